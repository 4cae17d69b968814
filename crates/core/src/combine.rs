use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{HdrError, Result};

/// Reduction applied along the plane axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombineMethod {
    #[default]
    Mean,
    Median,
}

impl CombineMethod {
    fn reduce(self, values: &mut Vec<f64>) -> f64 {
        match self {
            CombineMethod::Mean => values.iter().sum::<f64>() / values.len() as f64,
            CombineMethod::Median => {
                values.sort_by(|a, b| a.total_cmp(b));
                let mid = values.len() / 2;
                if values.len() % 2 == 0 {
                    (values[mid - 1] + values[mid]) / 2.0
                } else {
                    values[mid]
                }
            }
        }
    }
}

/// A stack of same-shaped images, row-major over [plane, row, col].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cube {
    pub planes: usize,
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f64>,
}

impl Cube {
    pub fn new(planes: usize, rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != planes * rows * cols {
            return Err(HdrError::NotACube {
                shape: (planes, rows, cols),
                len: data.len(),
            });
        }
        Ok(Self {
            planes,
            rows,
            cols,
            data,
        })
    }

    pub fn zeros(planes: usize, rows: usize, cols: usize) -> Self {
        Self {
            planes,
            rows,
            cols,
            data: vec![0.0; planes * rows * cols],
        }
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (self.planes, self.rows, self.cols)
    }

    #[inline]
    pub fn at(&self, plane: usize, row: usize, col: usize) -> f64 {
        self.data[(plane * self.rows + row) * self.cols + col]
    }
}

/// A single 2-D image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f64>,
}

impl Image {
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }
}

/// Collapse a cube into one image: for each pixel, reduce the plane
/// values whose mask entry is zero ("not masked").
///
/// A pixel masked in every plane has no defined value; it comes out as
/// NaN rather than dividing by zero.
pub fn masked_combine_with(cube: &Cube, mask: &Cube, method: CombineMethod) -> Result<Image> {
    if mask.shape() != cube.shape() {
        return Err(HdrError::ShapeMismatch {
            cube: cube.shape(),
            mask: mask.shape(),
        });
    }
    let (rows, cols) = (cube.rows, cube.cols);
    let data: Vec<f64> = (0..rows * cols)
        .into_par_iter()
        .map(|pixel| {
            let (row, col) = (pixel / cols, pixel % cols);
            let mut kept: Vec<f64> = (0..cube.planes)
                .filter(|&plane| mask.at(plane, row, col) == 0.0)
                .map(|plane| cube.at(plane, row, col))
                .collect();
            if kept.is_empty() {
                f64::NAN
            } else {
                method.reduce(&mut kept)
            }
        })
        .collect();
    Ok(Image { rows, cols, data })
}

/// Masked mean over the plane axis.
pub fn masked_combine(cube: &Cube, mask: &Cube) -> Result<Image> {
    masked_combine_with(cube, mask, CombineMethod::Mean)
}

/// Collapse without a mask: every plane participates.
pub fn combine(cube: &Cube, method: CombineMethod) -> Image {
    let mask = Cube::zeros(cube.planes, cube.rows, cube.cols);
    masked_combine_with(cube, &mask, method).expect("zero mask always matches the cube shape")
}
