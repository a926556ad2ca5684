use std::borrow::Borrow;
use tch::Tensor;

/// Returns a tensor equal to `value` in the forward pass whose derivative with
/// respect to each `input` is the paired elementwise `grad`.
///
/// Every input must already have the shape of `value`. Inputs that do not
/// require grad are skipped.
pub fn attach_grad(value: &Tensor, pairs: &[(&Tensor, &Tensor)]) -> Tensor {
    let mut out = value.detach();
    for (input, grad) in pairs {
        if input.requires_grad() {
            out = out + surrogate(input, grad);
        }
    }
    out
}

// Zero in the forward pass, `grad` in the backward pass.
fn surrogate(input: &Tensor, grad: &Tensor) -> Tensor {
    let grad = grad.detach();
    let zeros = grad.zeros_like();
    let delta = input - input.detach();

    let infinite = grad.isinf();
    let finite_part = &delta * grad.where_self(&infinite.logical_not(), &zeros);

    // d sqrt(t)/dt is +inf at t == 0, while sqrt(0) stays 0 in the forward pass.
    let signs = grad.sign().where_self(&infinite, &zeros);
    let infinite_part = delta.where_self(&infinite, &zeros).sqrt() * signs;

    finite_part + infinite_part
}

/// Gradient of `output.sum()` with respect to each of `inputs`.
pub fn grad<T: Borrow<Tensor>>(output: &Tensor, inputs: &[T]) -> Vec<Tensor> {
    let total = output.sum(output.kind());
    Tensor::run_backward(&[total], inputs, false, false)
}
