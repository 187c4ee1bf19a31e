/// Euclidean norm of `v`.
pub fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Scale `v` to unit length in place. A zero vector is left untouched.
pub fn l2_normalize(v: &mut [f64]) {
    let norm = l2_norm(v);
    if norm == 0.0 { return; }
    for x in v.iter_mut() { *x /= norm; }
}
