//! Side by side comparison of the methods on fₐ(x) = a x − x ln x,
//! whose root is eᵃ.  Usage:
//!
//!     cargo run --example comparison -- [--verbose] [a …]

use std::{env, error::Error};
use rootcompare::{bisection, bisection_min_iterations, false_position,
                  newton_raphson, secant, Method, Report};

const EPSILON: f64 = 1e-5;
const MAXITER: usize = 100;

/// One column of a board.
struct Column {
    name: &'static str,
    data: String,
    report: Report<f64>,
}

fn main() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let mut verbose = false;
    let mut params = vec![];
    for arg in env::args().skip(1) {
        if arg == "--verbose" || arg == "-v" {
            verbose = true;
        } else {
            params.push(arg.parse::<f64>()?);
        }
    }
    if params.is_empty() {
        params = vec![1., 1.4, 8.];
    }

    for (i, &a) in params.iter().enumerate() {
        let f = move |x: f64| a * x - x * x.ln();
        let df = move |x: f64| a - x.ln() - 1.;
        let (lo, hi) = (2f64.powf(a), 3f64.powf(a));
        let (lo, hi) = if a < 0. { (hi, lo) } else { (lo, hi) };
        let x0 = 2.7f64.powf(a);
        if verbose {
            println!("Bisection needs at least ⌈(log₁₀(b − a) − log₁₀ ε) \
                      / log₁₀ 2⌉ = {} iterations on [{lo}, {hi}].",
                     bisection_min_iterations(lo, hi, EPSILON));
        }

        let bracket = format!("[{lo:.6}, {hi:.6}]");
        let mut b = bisection(f, lo, hi).epsilon(EPSILON).maxiter(MAXITER);
        let mut fp = false_position(f, lo, hi).epsilon(EPSILON)
            .maxiter(MAXITER);
        let mut n = newton_raphson(f, df, x0).epsilon(EPSILON)
            .maxiter(MAXITER);
        let mut s = secant(f, lo, hi).epsilon(EPSILON).maxiter(MAXITER);
        let columns = [
            Column { name: b.name(), data: bracket.clone(), report: b.solve()? },
            Column { name: fp.name(), data: bracket.clone(),
                     report: fp.solve()? },
            Column { name: n.name(), data: format!("x0 = {x0:.6}"),
                     report: n.solve()? },
            Column { name: s.name(), data: bracket, report: s.solve()? },
        ];
        if verbose {
            for c in &columns {
                println!("{}: {}", c.name, c.report);
            }
        }
        print_board(i + 1, a, &columns);
    }
    Ok(())
}

fn print_board(n: usize, a: f64, columns: &[Column]) {
    let rows = ["method", "initial data", "x", "|f(x)|", "error",
                "converged", "iterations"];
    let cells: Vec<[String; 7]> = columns.iter().map(|c| {
        let r = &c.report;
        [c.name.to_string(),
         c.data.clone(),
         format!("{:.10}", r.root),
         r.residual.map_or("-".to_string(), |e| format!("{e:.3e}")),
         format!("{:.3e}", r.error),
         (if r.converged { "yes" } else { "no" }).to_string(),
         r.iterations.to_string()]
    }).collect();
    let head = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let widths: Vec<usize> = cells.iter()
        .map(|c| c.iter().map(|s| s.chars().count()).max().unwrap_or(0))
        .collect();

    println!("Board {n}: a = {a}, exact root eᵃ = {:.10}", a.exp());
    let rule = "-".repeat(head + widths.iter().map(|w| w + 3).sum::<usize>());
    println!("{rule}");
    for (i, row) in rows.iter().enumerate() {
        print!("{row:<head$}");
        for (c, w) in cells.iter().zip(&widths) {
            print!(" | {:>w$}", c[i], w = w);
        }
        println!();
        if i == 0 {
            println!("{rule}");
        }
    }
    println!("{rule}\n");
}
