//! Solve x sin x = level for many random levels in parallel and
//! compare the average number of iterations of the methods.

use std::{error::Error, iter, time::Instant};
use rootcompare::{bisection, false_position, newton_raphson, Method, Report};
use rand::prelude::*;
use rayon::prelude::*;

fn summary(name: &str, reports: &[Report<f64>], secs: f64) {
    let converged = reports.iter().filter(|r| r.converged).count();
    let iter: usize = reports.iter().map(|r| r.iterations).sum();
    println!("{name}: {converged}/{} converged, {:.2} iterations on \
              average ({secs:.3} secs)",
             reports.len(), iter as f64 / reports.len() as f64);
}

fn main() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    const N: usize = 100_000;
    let levels: Vec<_> = iter::from_fn(|| Some(0.01 + 1.49 * random::<f64>()))
        .take(N).collect();

    let now = Instant::now();
    let reports: Vec<_> = levels
        .par_iter()
        .map(|lv| bisection(|x: f64| x * x.sin() - lv, 0., 2.)
             .epsilon(1e-10).solve())
        .collect::<Result<_, _>>()?;
    summary("bisection", &reports, now.elapsed().as_secs_f64());

    let now = Instant::now();
    let reports: Vec<_> = levels
        .par_iter()
        .map(|lv| false_position(|x: f64| x * x.sin() - lv, 0., 2.)
             .epsilon(1e-10).solve())
        .collect::<Result<_, _>>()?;
    summary("false position", &reports, now.elapsed().as_secs_f64());

    let now = Instant::now();
    let reports: Vec<_> = levels
        .par_iter()
        .map(|lv| newton_raphson(|x: f64| x * x.sin() - lv,
                                 |x: f64| x.sin() + x * x.cos(), 1.5)
             .epsilon(1e-10).solve())
        .collect::<Result<_, _>>()?;
    summary("Newton-Raphson", &reports, now.elapsed().as_secs_f64());

    Ok(())
}
