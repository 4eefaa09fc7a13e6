// src/packed2d.rs
//
// The 2-D packed-Hermitian real-FFT codec ("RealFFTUtils_2D"): folds the
// conjugate-symmetric spectrum of a real `rows x cols` input (both
// dimensions even) back into a same-size real buffer, and unfolds it
// again. Odd `rows`/`cols` don't use this layout at all -- the column-0
// and column-(cols/2) slots this codec relies on only exist when `cols`
// is even, and the same row-axis argument requires `rows` even too; those
// shapes go through `Plan2D::real_forward_full`/`real_inverse_full`
// instead, which carry the unpacked complex spectrum.
//
// For real input, column 0 of the full spectrum is exactly the 1-D DFT of
// the (real-valued) row sums, and column `cols/2` is exactly the 1-D DFT
// of the row sums weighted by `(-1)^c` -- both real-input DFTs in their
// own right, and so themselves conjugate-symmetric in the row index.
// Those two columns are folded together into the first two float slots
// of every row: rows `[1, rows/2)` hold column 0's interior values
// directly, and their row-mirrors `rows/2+1 .. rows` hold column
// `cols/2`'s interior values, with the four corner values (row 0 and
// row `rows/2`, both columns) packed into the remaining four corner
// slots. Every other column comes in a conjugate-symmetric pair
// `(c, cols - c)` and is stored in full only for `c` in `[1, cols/2)`.

use num_complex::Complex64;

use crate::error::FftError;

/// Whether `(rows, cols)` is eligible for the packed-Hermitian layout.
pub(crate) fn supports_packed_layout(rows: usize, cols: usize) -> bool {
    rows % 2 == 0 && cols % 2 == 0
}

/// Packs a full `rows x cols` row-major complex spectrum (both dimensions
/// even) into a `rows * cols` real buffer using the layout above.
pub(crate) fn pack_full(spectrum: &[Complex64], rows: usize, cols: usize, out: &mut [f64]) {
    debug_assert!(supports_packed_layout(rows, cols));
    debug_assert_eq!(spectrum.len(), rows * cols);
    debug_assert_eq!(out.len(), rows * cols);

    let rows_half = rows / 2;
    let cols_half = cols / 2;

    out[0] = spectrum[0].re;
    out[1] = spectrum[cols_half].re;
    out[rows_half * cols] = spectrum[rows_half * cols].re;
    out[rows_half * cols + 1] = spectrum[rows_half * cols + cols_half].re;

    for r in 1..rows_half {
        let v0 = spectrum[r * cols];
        out[r * cols] = v0.re;
        out[r * cols + 1] = v0.im;

        let mirror_row = rows - r;
        let v_nyq = spectrum[r * cols + cols_half];
        out[mirror_row * cols] = v_nyq.re;
        out[mirror_row * cols + 1] = v_nyq.im;
    }

    for c in 1..cols_half {
        for r in 0..rows {
            let v = spectrum[r * cols + c];
            out[r * cols + 2 * c] = v.re;
            out[r * cols + 2 * c + 1] = v.im;
        }
    }
}

/// Reconstructs the full `rows x cols` complex spectrum from a packed
/// buffer produced by [`pack_full`].
pub(crate) fn unpack(buf: &[f64], rows: usize, cols: usize) -> Vec<Complex64> {
    debug_assert!(supports_packed_layout(rows, cols));
    debug_assert_eq!(buf.len(), rows * cols);

    let rows_half = rows / 2;
    let cols_half = cols / 2;
    let mut spectrum = vec![Complex64::new(0.0, 0.0); rows * cols];

    spectrum[0] = Complex64::new(buf[0], 0.0);
    spectrum[cols_half] = Complex64::new(buf[1], 0.0);
    spectrum[rows_half * cols] = Complex64::new(buf[rows_half * cols], 0.0);
    spectrum[rows_half * cols + cols_half] = Complex64::new(buf[rows_half * cols + 1], 0.0);

    for r in 1..rows_half {
        let v0 = Complex64::new(buf[r * cols], buf[r * cols + 1]);
        spectrum[r * cols] = v0;
        spectrum[(rows - r) * cols] = v0.conj();

        let mirror_row = rows - r;
        let v_nyq = Complex64::new(buf[mirror_row * cols], buf[mirror_row * cols + 1]);
        spectrum[r * cols + cols_half] = v_nyq;
        spectrum[mirror_row * cols + cols_half] = v_nyq.conj();
    }

    for c in 1..cols_half {
        for r in 0..rows {
            let v = Complex64::new(buf[r * cols + 2 * c], buf[r * cols + 2 * c + 1]);
            spectrum[r * cols + c] = v;
        }
        for r in 0..rows {
            let mirror_r = (rows - r) % rows;
            spectrum[r * cols + (cols - c)] = spectrum[mirror_r * cols + c].conj();
        }
    }

    spectrum
}

fn check_coordinate(rows: usize, cols: usize, row: usize, col: usize) -> Result<(), FftError> {
    if row < rows && col < cols {
        Ok(())
    } else {
        Err(FftError::InvalidPackedCoordinate { row, col, rows, cols })
    }
}

/// Reads the full-spectrum value at `(row, col)` directly out of a packed
/// buffer (both dimensions even), without materializing the whole
/// unpacked spectrum.
pub fn get(buf: &[f64], rows: usize, cols: usize, row: usize, col: usize) -> Result<Complex64, FftError> {
    check_coordinate(rows, cols, row, col)?;
    // Cheap for occasional lookups; callers reading many coordinates
    // should call `unpack` once instead.
    let spectrum = unpack(buf, rows, cols);
    Ok(spectrum[row * cols + col])
}

/// How far a written value may drift from what conjugate symmetry implies
/// before a coordinate write is rejected.
const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Writes `value` into the packed buffer at logical coordinate `(row, col)`
/// of the full `rows x cols` spectrum.
///
/// `(row, col)` may land on a cell that's structurally redundant with
/// another (its conjugate mirror, or the always-real DC/Nyquist corners):
/// in that case the write succeeds only if `value` is consistent with what
/// conjugate symmetry already implies from the buffer's other cells,
/// otherwise it fails with [`FftError::InvalidPackedCoordinate`] rather
/// than silently corrupting the layout.
pub fn pack(buf: &mut [f64], rows: usize, cols: usize, row: usize, col: usize, value: Complex64) -> Result<(), FftError> {
    check_coordinate(rows, cols, row, col)?;
    let mut spectrum = unpack(buf, rows, cols);

    let rows_half = rows / 2;
    let cols_half = cols / 2;
    let idx = row * cols + col;
    let mirror_idx = ((rows - row) % rows) * cols + (cols - col) % cols;

    let is_corner = (row == 0 || row == rows_half) && (col == 0 || col == cols_half);
    let is_redundant = col > cols_half || ((col == 0 || col == cols_half) && row > rows_half);

    if is_corner {
        if value.im.abs() > SYMMETRY_TOLERANCE {
            return Err(FftError::InvalidPackedCoordinate { row, col, rows, cols });
        }
        spectrum[idx] = Complex64::new(value.re, 0.0);
    } else if is_redundant {
        let expected = spectrum[mirror_idx].conj();
        if (value - expected).norm() > SYMMETRY_TOLERANCE {
            return Err(FftError::InvalidPackedCoordinate { row, col, rows, cols });
        }
    } else {
        spectrum[idx] = value;
        spectrum[mirror_idx] = value.conj();
    }

    pack_full(&spectrum, rows, cols, buf);
    Ok(())
}

#[cfg(test)]
#[path = "packed2d_tests.rs"]
mod tests;
