use std::fmt;

/// Errors returned by the checked accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinalgError {
    /// A component or linear cell index outside `0..len`.
    IndexOutOfRange { index: usize, len: usize },
    /// A `(row, col)` pair outside a `rows × cols` matrix.
    CellOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

impl fmt::Display for LinalgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Self::CellOutOfRange {
                row,
                col,
                rows,
                cols,
            } => write!(
                f,
                "cell ({row}, {col}) out of range for {rows}x{cols} matrix"
            ),
        }
    }
}

impl std::error::Error for LinalgError {}

pub(crate) fn check_index(index: usize, len: usize) -> Result<(), LinalgError> {
    if index < len {
        Ok(())
    } else {
        Err(LinalgError::IndexOutOfRange { index, len })
    }
}

pub(crate) fn check_cell(
    row: usize,
    col: usize,
    rows: usize,
    cols: usize,
) -> Result<(), LinalgError> {
    if row < rows && col < cols {
        Ok(())
    } else {
        Err(LinalgError::CellOutOfRange {
            row,
            col,
            rows,
            cols,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            LinalgError::IndexOutOfRange { index: 2, len: 2 }.to_string(),
            "index 2 out of range for length 2"
        );
        assert_eq!(
            LinalgError::CellOutOfRange {
                row: 0,
                col: 3,
                rows: 2,
                cols: 3
            }
            .to_string(),
            "cell (0, 3) out of range for 2x3 matrix"
        );
    }

    #[test]
    fn converts_into_anyhow() {
        fn fallible() -> anyhow::Result<()> {
            check_index(4, 4)?;
            Ok(())
        }
        let err = fallible().unwrap_err();
        assert_eq!(
            err.downcast_ref::<LinalgError>(),
            Some(&LinalgError::IndexOutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn in_range() {
        assert!(check_index(0, 1).is_ok());
        assert!(check_index(3, 4).is_ok());
        assert!(check_cell(1, 2, 2, 3).is_ok());
        assert_eq!(
            check_cell(2, 0, 2, 3),
            Err(LinalgError::CellOutOfRange {
                row: 2,
                col: 0,
                rows: 2,
                cols: 3
            })
        );
    }
}
