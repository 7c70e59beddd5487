//! # Modular Arithmetic
//!
//! Integer arithmetic shared by every cipher and attack: gcd, scalar and
//! matrix modular inverses, exact determinants for 2x2 / 3x3 matrices.
//!
//! ## Matrix Inverse mod m
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    MATRIX INVERSE (mod m)                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  1. det = determinant(M) mod m                                         │
//! │  2. det⁻¹ = mod_inverse(det, m)      ──► SingularMatrix if none        │
//! │  3. adj = adjugate(M)                                                  │
//! │       2x2: [[d, -b], [-c, a]]                                          │
//! │       3x3: transpose of the cofactor matrix                            │
//! │  4. M⁻¹ = (det⁻¹ · adj) mod m                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All reductions use Euclidean remainder so results are always in `[0, m)`.

use crate::error::{Error, Result};

/// Alphabet size for the classical ciphers
pub const ALPHABET_MODULUS: i64 = 26;

/// Modulus for the byte-oriented ciphers
pub const BYTE_MODULUS: i64 = 256;

/// Square integer matrix, row-major
pub type Matrix = Vec<Vec<i64>>;

/// Greatest common divisor (always non-negative)
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Modular multiplicative inverse of `a` mod `m`
///
/// Returns the unique `x` in `[1, m)` with `a·x ≡ 1 (mod m)`. The search is
/// a linear scan, which is fine for the moduli used here (26 and 256).
pub fn mod_inverse(a: i64, m: i64) -> Result<i64> {
    let reduced = a.rem_euclid(m);
    if gcd(reduced, m) != 1 {
        return Err(Error::NoInverse { value: a, modulus: m });
    }

    (1..m)
        .find(|x| (reduced * x).rem_euclid(m) == 1)
        .ok_or(Error::NoInverse { value: a, modulus: m })
}

/// Validate that `matrix` is 2x2 or 3x3 and return its size
pub fn square_size(matrix: &[Vec<i64>]) -> Result<usize> {
    let rows = matrix.len();
    let cols = matrix.first().map(Vec::len).unwrap_or(0);

    let square = matrix.iter().all(|row| row.len() == rows);
    if !square || !(rows == 2 || rows == 3) {
        return Err(Error::UnsupportedSize { rows, cols });
    }
    Ok(rows)
}

/// Exact integer determinant of a 2x2 or 3x3 matrix
pub fn determinant(matrix: &[Vec<i64>]) -> Result<i64> {
    let m = matrix;
    match square_size(m)? {
        2 => Ok(m[0][0] * m[1][1] - m[0][1] * m[1][0]),
        _ => Ok(m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])),
    }
}

/// Adjugate (transpose of the cofactor matrix)
pub fn adjugate(matrix: &[Vec<i64>]) -> Result<Matrix> {
    let m = matrix;
    match square_size(m)? {
        2 => Ok(vec![vec![m[1][1], -m[0][1]], vec![-m[1][0], m[0][0]]]),
        _ => {
            let mut adj = vec![vec![0i64; 3]; 3];
            for i in 0..3 {
                for j in 0..3 {
                    let minor: Vec<i64> = (0..3)
                        .filter(|&r| r != i)
                        .flat_map(|r| (0..3).filter(move |&c| c != j).map(move |c| (r, c)))
                        .map(|(r, c)| m[r][c])
                        .collect();
                    let minor_det = minor[0] * minor[3] - minor[1] * minor[2];
                    let sign = if (i + j) % 2 == 0 { 1 } else { -1 };
                    // Transposed placement: cofactor (i, j) lands at (j, i).
                    adj[j][i] = sign * minor_det;
                }
            }
            Ok(adj)
        }
    }
}

/// Modular inverse of a 2x2 or 3x3 matrix
///
/// ## Errors
///
/// - `UnsupportedSize` if the matrix is not 2x2 or 3x3
/// - `SingularMatrix` if the determinant has no inverse mod `modulus`
pub fn matrix_mod_inverse(matrix: &[Vec<i64>], modulus: i64) -> Result<Matrix> {
    let det = determinant(matrix)?.rem_euclid(modulus);
    let det_inv = mod_inverse(det, modulus).map_err(|_| Error::SingularMatrix {
        determinant: det,
        modulus,
    })?;

    let inverse = adjugate(matrix)?
        .into_iter()
        .map(|row| row.into_iter().map(|v| (det_inv * v).rem_euclid(modulus)).collect())
        .collect();

    tracing::debug!(det, det_inv, modulus, "Computed matrix inverse");
    Ok(inverse)
}

/// `(a · b) mod m` with both operands reduced first
fn mul_mod(a: i64, b: i64, modulus: i64) -> i64 {
    (a.rem_euclid(modulus) * b.rem_euclid(modulus)) % modulus
}

/// `(M · v) mod m` for a column vector `v`
///
/// Entries are reduced before multiplying, so any `i64` input is accepted.
pub fn mat_vec_mod(matrix: &[Vec<i64>], vector: &[i64], modulus: i64) -> Vec<i64> {
    matrix
        .iter()
        .map(|row| {
            row.iter()
                .zip(vector)
                .fold(0, |acc, (&a, &b)| (acc + mul_mod(a, b, modulus)) % modulus)
        })
        .collect()
}

/// `(A · B) mod m` for square matrices of equal size
pub fn mat_mul_mod(a: &[Vec<i64>], b: &[Vec<i64>], modulus: i64) -> Matrix {
    let n = a.len();
    (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    (0..n).fold(0, |acc, k| (acc + mul_mod(a[i][k], b[k][j], modulus)) % modulus)
                })
                .collect()
        })
        .collect()
}

/// Render a matrix for step traces, e.g. `[[3 3]\n [2 5]]`
pub fn format_matrix(matrix: &[Vec<i64>]) -> String {
    let rows: Vec<String> = matrix
        .iter()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(i64::to_string).collect();
            format!("[{}]", cells.join(" "))
        })
        .collect();
    format!("[{}]", rows.join("\n "))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(26, 5), 1);
        assert_eq!(gcd(26, 13), 13);
        assert_eq!(gcd(0, 26), 26);
        assert_eq!(gcd(-4, 26), 2);
    }

    #[test]
    fn test_mod_inverse() {
        assert_eq!(mod_inverse(5, 26).unwrap(), 21);
        assert_eq!(mod_inverse(3, 26).unwrap(), 9);
        assert_eq!(mod_inverse(-5, 26).unwrap(), 5);
        assert_eq!(mod_inverse(3, 256).unwrap(), 171);
    }

    #[test]
    fn test_mod_inverse_missing() {
        let err = mod_inverse(13, 26).unwrap_err();
        assert_eq!(err, Error::NoInverse { value: 13, modulus: 26 });
        assert!(mod_inverse(2, 256).is_err());
    }

    #[test]
    fn test_determinants() {
        assert_eq!(determinant(&[vec![3, 3], vec![2, 5]]).unwrap(), 9);
        let m = vec![vec![6, 24, 1], vec![13, 16, 10], vec![20, 17, 15]];
        assert_eq!(determinant(&m).unwrap(), 441);
    }

    #[test]
    fn test_matrix_inverse_2x2() {
        let key = vec![vec![3, 3], vec![2, 5]];
        let inv = matrix_mod_inverse(&key, 26).unwrap();
        assert_eq!(inv, vec![vec![15, 17], vec![20, 9]]);
        assert_eq!(mat_mul_mod(&key, &inv, 26), vec![vec![1, 0], vec![0, 1]]);
    }

    #[test]
    fn test_matrix_inverse_3x3() {
        let key = vec![vec![6, 24, 1], vec![13, 16, 10], vec![20, 17, 15]];
        let inv = matrix_mod_inverse(&key, 26).unwrap();
        assert_eq!(
            inv,
            vec![vec![8, 5, 10], vec![21, 8, 21], vec![21, 12, 8]]
        );
        let identity = mat_mul_mod(&key, &inv, 26);
        assert_eq!(identity, vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]]);
    }

    #[test]
    fn test_singular_matrix() {
        let err = matrix_mod_inverse(&[vec![2, 4], vec![1, 3]], 26).unwrap_err();
        assert_eq!(err, Error::SingularMatrix { determinant: 2, modulus: 26 });
    }

    #[test]
    fn test_unsupported_sizes() {
        let four = vec![vec![1; 4]; 4];
        assert!(matches!(
            matrix_mod_inverse(&four, 26),
            Err(Error::UnsupportedSize { rows: 4, cols: 4 })
        ));

        let ragged = vec![vec![1, 2], vec![3]];
        assert!(matches!(determinant(&ragged), Err(Error::UnsupportedSize { .. })));
    }

    #[test]
    fn test_mat_vec_mod() {
        let key = vec![vec![3, 3], vec![2, 5]];
        assert_eq!(mat_vec_mod(&key, &[7, 4], 26), vec![7, 8]);

        let huge = vec![vec![i64::MAX, i64::MIN], vec![3 + 26 * (i64::MAX / 26 - 1), 5]];
        // i64::MAX ≡ 7, i64::MIN ≡ 18
        assert_eq!(mat_vec_mod(&huge, &[7, i64::MAX], 26), vec![(49 + 126) % 26, (21 + 35) % 26]);
    }

    #[test]
    fn test_format_matrix() {
        assert_eq!(format_matrix(&[vec![3, 3], vec![2, 5]]), "[[3 3]\n [2 5]]");
    }
}
