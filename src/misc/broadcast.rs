use crate::error::{DistributionError, Result};
use tch::Tensor;

/// Joint shape of `shapes` under trailing-dimension broadcasting.
///
/// Missing leading dimensions count as 1, and a dimension of size 1 stretches
/// to match the other operand.
pub fn broadcast_shapes(shapes: &[&[i64]]) -> Result<Vec<i64>> {
    let ndim = shapes.iter().map(|s| s.len()).max().unwrap_or(0);
    let mut out = vec![1i64; ndim];

    for shape in shapes {
        let offset = ndim - shape.len();
        let mut merged = out.clone();
        for (i, &dim) in shape.iter().enumerate() {
            let acc = &mut merged[offset + i];
            if dim == *acc || dim == 1 {
                continue;
            }
            if *acc != 1 {
                return Err(DistributionError::Shape {
                    left: out,
                    right: shape.to_vec(),
                });
            }
            *acc = dim;
        }
        out = merged;
    }
    Ok(out)
}

/// Expands every tensor to the joint broadcast shape.
pub fn broadcast_tensors(tensors: &[&Tensor]) -> Result<Vec<Tensor>> {
    let sizes: Vec<Vec<i64>> = tensors.iter().map(|t| t.size()).collect();
    let refs: Vec<&[i64]> = sizes.iter().map(|s| s.as_slice()).collect();
    let shape = broadcast_shapes(&refs)?;
    Ok(tensors.iter().map(|t| t.expand(&shape, false)).collect())
}

pub(crate) fn broadcast_pair(x: &Tensor, y: &Tensor) -> Result<(Tensor, Tensor)> {
    let (xs, ys) = (x.size(), y.size());
    let shape = broadcast_shapes(&[xs.as_slice(), ys.as_slice()])?;
    Ok((x.expand(&shape, false), y.expand(&shape, false)))
}
