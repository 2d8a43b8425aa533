//! Trace the iterations of the methods on p(x) = x³ − 2x − 5.

use std::{error::Error, fmt::Debug};
use rootcompare::{eval_derivative_polynomial, eval_polynomial, fixed_point,
                  newton_raphson, polynomial_newton_raphson, secant, Method};

fn trace<M>(method: &mut M) -> Result<(), Box<dyn Error + 'static>>
where M: Method<f64>, M::Error: Debug + 'static {
    println!("{}:", method.name());
    let mut steps = method.steps()?;
    for s in &mut steps {
        let s = s?;
        match s.fx {
            Some(fx) => println!("{:4}  x = {:<22}  f(x) = {:<+10.3e} \
                                  error = {:.3e}", s.k, s.x, fx, s.error),
            None => println!("{:4}  x = {:<22}  error = {:.3e}",
                             s.k, s.x, s.error),
        }
    }
    if let Some(r) = steps.report() {
        println!("  {r}\n");
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error + 'static>> {
    let coeffs = [1., 0., -2., -5.];
    let p = |x| eval_polynomial(&coeffs, x);
    let dp = |x| eval_derivative_polynomial(&coeffs, x);
    let eps = 1e-12;

    trace(&mut polynomial_newton_raphson(&coeffs, 2.).epsilon(eps))?;
    trace(&mut newton_raphson(p, dp, 2.).epsilon(eps))?;
    trace(&mut secant(p, 2., 3.).epsilon(eps))?;
    // x = ∛(2x + 5) is a contraction near the root.
    trace(&mut fixed_point(|x: f64| (2. * x + 5.).cbrt(), 2.).epsilon(eps))?;
    Ok(())
}
