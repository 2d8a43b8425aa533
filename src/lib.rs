//! Classical one dimensional root finding methods with convergence
//! diagnostics.
//!
//! This crate offers the textbook menu of iterative root finders for
//! functions from ℝ to ℝ: two *bracketing* methods ([`bisection`] and
//! [`false_position`]), which start with an interval \[a,b\] on which
//! the function changes sign, and four *open* methods
//! ([`fixed_point`], [`newton_raphson`], [`secant`] and
//! [`polynomial_newton_raphson`]) which start from one or two initial
//! guesses.  Instead of a bare number, every method returns a
//! [`Report`] describing how the iteration went so that the methods
//! can be compared on the same problem.
//!
//! # Example
//!
//! All methods have the same structure.  A function such as
//! [`bisection`] takes the problem data and returns a structure
//! ([`Bisection`]) with methods to set options (such as
//! [`epsilon`][Bisection::epsilon]).  The computation is performed by
//! the [`Method`] trait: [`solve`][Method::solve] returns the
//! [`Report`], [`root`][Method::root] just the root and
//! [`steps`][Method::steps] a lazy sequence of per-iteration
//! snapshots.
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use rootcompare::{bisection, newton_raphson, Method};
//! let f = |x: f64| x * x - 2.;
//! let b = bisection(f, 0., 2.).epsilon(1e-6).solve()?;
//! let n = newton_raphson(f, |x| 2. * x, 1.).epsilon(1e-6).solve()?;
//! assert!(b.converged && n.converged);
//! assert!(n.iterations < b.iterations);
//! # Ok(()) }
//! ```
//!
//! # Stopping rules
//!
//! Each method keeps its own classical stopping rule; they are *not*
//! unified.  Bisection stops on the bracket width, false position on
//! the bracket width *or* the distance between successive iterates,
//! the open methods on the distance between successive iterates.  The
//! secant method additionally stops, reporting convergence, when the
//! two function values it interpolates are equal (see [`Stop`]).

#![cfg_attr(feature = "nightly", feature(never_type))]

use std::{
    fmt::{self, Debug, Display, Formatter},
    iter::FusedIterator,
    marker::PhantomData,
    ops::{Neg, Add, Sub, Mul, Div},
    result::Result,
};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

#[cfg(feature = "nightly")]
/// Type indicating that no error is raised by the function.
pub type NoError = !;
#[cfg(not(feature = "nightly"))]
#[derive(Debug)]
/// Type indicating that no error is raised by the function.
pub enum NoError {}

/// Errors that may be returned by the root finding methods.
///
/// Failing to converge is *not* an error: it is reported by
/// [`Report::converged`].
#[derive(Debug)]
pub enum Error<T, E = NoError> {
    /// The function does not change sign on the initial interval
    /// \[a, b\] of a bracketing method, i.e., `f(a)·f(b) < 0` does not
    /// hold.  No iteration was performed.
    InvalidBracket { a: T, fa: T, b: T, fb: T },
    /// A bound of the initial interval of a bracketing method is not
    /// finite.
    NotFinite { x: T, fx: T },
    /// Error returned by the function evaluated at `x`.
    Fun { x: T, err: E },
}

impl<T: Display, E: Debug> Display for Error<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidBracket { a, fa, b, fb } =>
                write!(f, "invalid bracket: f(a) and f(b) must have opposite \
                           signs on [a, b] = [{a}, {b}], f(a) = {fa}, \
                           f(b) = {fb}"),
            Error::NotFinite { x, fx } => {
                write!(f, "the bracket bound {} is not finite (value {})",
                       x, fx)
            }
            Error::Fun { x, err } => {
                write!(f, "evaluating the function at {} yields the error \
                          {:?}", x, err)
            }
        }
    }
}

impl<T: Debug + Display, E: Debug> std::error::Error for Error<T, E> {}

////////////////////////////////////////////////////////////////////////
//
// Error returning functions

/// A float type or a Result type for floats.  This allows the
/// functions given to the methods to either return a number or
/// `Result<number, E>`.  In the latter case, an `Err` stops the
/// method which returns [`Error::Fun`].
pub trait FloatOrError<T> {
    type Error;
    fn to_result(self) -> Result<T, Self::Error>;
}

macro_rules! impl_float_or_error { ($t: ty) => {
    impl FloatOrError<$t> for $t {
        type Error = NoError;

        #[inline]
        fn to_result(self) -> Result<$t, NoError> { Ok(self) }
    }
    impl<E> FloatOrError<$t> for Result<$t, E> {
        type Error = E;

        #[inline]
        fn to_result(self) -> Result<$t, E> { self }
    }
}}

impl_float_or_error!(f64);
impl_float_or_error!(f32);

#[inline]
fn eval_float_result<T, F, R>(mut f: F, x: T) -> Result<T, Error<T, R::Error>>
where
    T: Copy,
    F: FnMut(T) -> R,
    R: FloatOrError<T>,
{
    f(x).to_result()
        .map_err(|err| Error::Fun{ x, err })
}

////////////////////////////////////////////////////////////////////////
//
// Number types

/// Trait for the real number types the methods work with.  It is
/// implemented for [`f64`] and [`f32`].
pub trait Real:
    Copy
    + PartialOrd
    + Debug
    + Display
    + Neg<Output = Self>
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<Self, Output = Self>
    + Div<Self, Output = Self>
{
    /// Tolerance used when none is given, `1e-5`.
    const DEFAULT_EPSILON: Self;

    /// The number 0.
    const ZERO: Self;

    /// Return `true` if `self` is `< 0` (thus not a NaN).
    fn lt0(self) -> bool;

    /// Return `true` if `self` is `> 0` (thus not a NaN).
    fn gt0(self) -> bool;

    /// Absolute value.
    fn abs(self) -> Self;

    /// Returns `true` iff `self` is neither infinite nor NaN.
    fn is_finite(self) -> bool;

    /// Midpoint of the interval \[`a`, `b`\], avoiding overflow.
    fn mid(a: Self, b: Self) -> Self;

    /// Convert a polynomial degree.
    fn from_usize(n: usize) -> Self;

    fn to_f64(self) -> f64;
}

macro_rules! impl_real_fXX {
    ($t: ty) => {
        impl Real for $t {
            const DEFAULT_EPSILON: Self = 1e-5;
            const ZERO: Self = 0.;
            #[inline]
            fn lt0(self) -> bool { self < 0. }
            #[inline]
            fn gt0(self) -> bool { self > 0. }
            #[inline]
            fn abs(self) -> Self { <$t>::abs(self) }
            #[inline]
            fn is_finite(self) -> bool { <$t>::is_finite(self) }
            #[inline]
            fn mid(a: Self, b: Self) -> Self {
                // Based on: F. Goualard, “How do you compute the
                // midpoint of an interval?,” ACM Trans. Math. Softw.,
                // vol. 40, no. 2, pp. 1–25, Feb. 2014, doi: 10.1145/2493882.
                let mid = 0.5 * (a + b);
                if mid.is_finite() { mid } else { 0.5 * a + 0.5 * b }
            }
            #[inline]
            fn from_usize(n: usize) -> Self { n as $t }
            #[inline]
            fn to_f64(self) -> f64 { self.into() }
        }
    }
}

impl_real_fXX!(f64);
impl_real_fXX!(f32);

/// Whether one of `u`, `v` is < 0 and the other > 0.  Unlike
/// `u * v < 0`, this does not suffer from underflow.
#[inline]
fn opposite_signs<T: Real>(u: T, v: T) -> bool {
    (u.lt0() && v.gt0()) || (u.gt0() && v.lt0())
}

/// Same as `u * v > 0` without underflow.
#[inline]
fn same_sign<T: Real>(u: T, v: T) -> bool {
    (u.lt0() && v.lt0()) || (u.gt0() && v.gt0())
}

////////////////////////////////////////////////////////////////////////
//
// Diagnostics

/// Reason why a method stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Stop {
    /// The width of the bracket fell below the tolerance.
    Width,
    /// Two successive iterates are closer than the tolerance.
    Delta,
    /// The secant method met `f(x₀) = f(x₁)` and could not proceed.
    /// This is reported as convergence although the tolerance may not
    /// have been reached.
    FlatSecant,
    /// The maximum number of iterations was reached.
    MaxIter,
}

impl Display for Stop {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stop::Width => "bracket width below tolerance",
            Stop::Delta => "step below tolerance",
            Stop::FlatSecant => "equal function values, secant stopped",
            Stop::MaxIter => "maximum number of iterations reached",
        };
        f.write_str(s)
    }
}

/// Outcome of a root finding method.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Report<T> {
    /// Final iterate, the best estimate of the root.
    pub root: T,
    /// Number of completed iterations, not counting the final check.
    /// Always ≤ the maximum number of iterations.
    pub iterations: usize,
    /// `true` iff the stopping criterion was met before exhausting
    /// the maximum number of iterations.
    pub converged: bool,
    /// |f(root)|.  `None` for [`fixed_point`] which only knows the
    /// iteration function.
    pub residual: Option<T>,
    /// The quantity last compared with the tolerance: the bracket
    /// width or the distance between the last two iterates.
    pub error: T,
    /// Final bracket of the bracketing methods, in the orientation of
    /// the initial one.
    pub bracket: Option<(T, T)>,
    /// Why the method stopped.
    pub stop: Stop,
}

impl<T> Report<T> {
    fn new(stop: Stop, root: T, iterations: usize,
           residual: Option<T>, error: T, bracket: Option<(T, T)>) -> Self {
        Report {
            root, iterations,
            converged: stop != Stop::MaxIter,
            residual, error, bracket, stop,
        }
    }
}

impl<T: Display> Display for Report<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "root = {} after {} iterations ({}), error = {}",
               self.root, self.iterations, self.stop, self.error)?;
        if let Some(r) = &self.residual {
            write!(f, ", |f(root)| = {}", r)?;
        }
        Ok(())
    }
}

/// Snapshot of one iteration, see [`Method::steps`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Step<T> {
    /// Index of the iteration, starting at 0.
    pub k: usize,
    /// Iterate examined during this iteration.
    pub x: T,
    /// Value of the function at `x` (`None` for [`fixed_point`]).
    pub fx: Option<T>,
    /// Quantity compared with the tolerance during this iteration.
    pub error: T,
    /// Bracket from which `x` was computed (bracketing methods only).
    pub bracket: Option<(T, T)>,
}

/// Result of one iteration of a [`Method`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flow<T> {
    /// The method goes on.
    Continue(Step<T>),
    /// Last iteration, with the final report.
    Stop(Step<T>, Report<T>),
}

////////////////////////////////////////////////////////////////////////
//
// Driving the methods

/// Default maximum number of iterations.
pub const DEFAULT_MAXITER: usize = 100;

/// Interface shared by all root finding methods.
///
/// Implementors only provide [`start`][Method::start] and
/// [`advance`][Method::advance]; [`solve`][Method::solve],
/// [`root`][Method::root] and [`steps`][Method::steps] are built on
/// them.
pub trait Method<T: Real> {
    /// Error that the user functions may return.
    type Error;

    /// Human readable name of the method.
    fn name(&self) -> &'static str;

    /// (Re)initialize the method, evaluating the function at the
    /// initial data and checking the preconditions.
    fn start(&mut self) -> Result<(), Error<T, Self::Error>>;

    /// Perform one iteration.  After a [`Flow::Stop`] or an error, the
    /// next call starts the method afresh.
    fn advance(&mut self) -> Result<Flow<T>, Error<T, Self::Error>>;

    /// Run the method to completion and return its [`Report`].
    fn solve(&mut self) -> Result<Report<T>, Error<T, Self::Error>> {
        self.start()?;
        loop {
            if let Flow::Stop(_, report) = self.advance()? {
                return Ok(report)
            }
        }
    }

    /// Return the estimate of the root (see [`Method::solve`]).
    fn root(&mut self) -> Result<T, Error<T, Self::Error>> {
        Ok(self.solve()?.root)
    }

    /// Return the lazy sequence of iterations.  The preconditions are
    /// checked immediately so, for example, an invalid bracket is
    /// reported here and not when iterating.
    ///
    /// # Example
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use rootcompare::{secant, Method};
    /// let mut m = secant(|x: f64| x.cos() - x, 0., 1.).epsilon(1e-12);
    /// let mut steps = m.steps()?;
    /// for s in &mut steps {
    ///     let s = s?;
    ///     println!("{:2}: x = {:.15}, |Δx| = {:e}", s.k, s.x, s.error);
    /// }
    /// assert!(steps.report().unwrap().converged);
    /// # Ok(()) }
    /// ```
    fn steps(&mut self) -> Result<Steps<'_, T, Self>, Error<T, Self::Error>>
    where Self: Sized {
        self.start()?;
        Ok(Steps { method: self, report: None, done: false })
    }
}

/// Lazy sequence of the iterations of a [`Method`], created by
/// [`Method::steps`].  It yields one [`Step`] per iteration,
/// including the last one, then ends.
pub struct Steps<'a, T, M> {
    method: &'a mut M,
    report: Option<Report<T>>,
    done: bool,
}

impl<'a, T: Real, M: Method<T>> Steps<'a, T, M> {
    /// The final report, available once the sequence is exhausted
    /// (and no error occurred).
    pub fn report(&self) -> Option<&Report<T>> {
        self.report.as_ref()
    }
}

impl<'a, T: Real, M: Method<T>> Iterator for Steps<'a, T, M> {
    type Item = Result<Step<T>, Error<T, M::Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None
        }
        match self.method.advance() {
            Ok(Flow::Continue(step)) => Some(Ok(step)),
            Ok(Flow::Stop(step, report)) => {
                self.done = true;
                self.report = Some(report);
                Some(Ok(step))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<'a, T: Real, M: Method<T>> FusedIterator for Steps<'a, T, M> {}

/// Define the standard option setters of a method.  The struct must
/// have the fields `epsilon: T` and `maxiter: usize`.
macro_rules! root_finding_options {
    ($struct: ident <$($g: ident),*>) => {
        impl<$($g),*> $struct<$($g),*> where T: Real {
            /// Set the tolerance.  The method stops when the quantity
            /// it monitors gets below `epsilon`.
            ///
            /// Set the default value (`1e-5`) if `epsilon` is ≤ 0 or NaN.
            #[must_use]
            pub fn epsilon(mut self, epsilon: T) -> Self {
                self.epsilon =
                    if epsilon.gt0() { epsilon } else { T::DEFAULT_EPSILON };
                self
            }

            /// Set the maximum number of iterations (default:
            /// [`DEFAULT_MAXITER`]).  With `0`, only the initial
            /// check is performed.
            #[must_use]
            pub fn maxiter(mut self, n: usize) -> Self {
                self.maxiter = n;
                self
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////
//
// Bracketing methods

/// State of the bracketing methods.  The orientation given by the
/// caller is kept (`a > b` is possible).
#[derive(Clone, Copy)]
struct Bracket<T> {
    k: usize,
    a: T,
    b: T,
    fa: T,
    fb: T,
    /// Previous iterate (false position only).
    x_prev: T,
}

impl<T: Real> Bracket<T> {
    /// Check the initial interval \[`a`, `b`\] and evaluate `f` at its
    /// bounds.
    fn new<F, R>(f: &mut F, a: T, b: T) -> Result<Self, Error<T, R::Error>>
    where
        F: FnMut(T) -> R,
        R: FloatOrError<T>,
    {
        if !a.is_finite() {
            return Err(Error::NotFinite { x: a, fx: a })
        }
        if !b.is_finite() {
            return Err(Error::NotFinite { x: b, fx: b })
        }
        let fa = eval_float_result(&mut *f, a)?;
        let fb = eval_float_result(&mut *f, b)?;
        if !opposite_signs(fa, fb) {
            return Err(Error::InvalidBracket { a, fa, b, fb })
        }
        Ok(Bracket { k: 0, a, b, fa, fb, x_prev: a })
    }

    #[inline]
    fn width(&self) -> T { (self.b - self.a).abs() }

    #[inline]
    fn bounds(&self) -> (T, T) { (self.a, self.b) }

    /// Replace the bound at which `f` has the same sign as `fx`.
    #[inline]
    fn narrow(&mut self, x: T, fx: T) {
        if same_sign(fx, self.fa) {
            self.a = x;
            self.fa = fx;
        } else {
            self.b = x;
            self.fb = fx;
        }
    }
}

/// Find a root of the function `f` on the interval \[`a`, `b`\]
/// assuming `f(a)` and `f(b)` have opposite signs and `f` is
/// continuous, using the bisection algorithm.
///
/// Starting the method when `f(a)·f(b) < 0` does *not* hold returns
/// the error [`Error::InvalidBracket`] before any iteration.
///
/// Each iteration takes the midpoint `x` of the current bracket and
/// stops if the width of the bracket is `< epsilon` (thus the
/// reported error is the width *before* narrowing and the reported
/// root the midpoint of that bracket).  Otherwise the bound at which
/// `f` has the same sign as `f(x)` is replaced by `x`.  If the
/// initial bracket is already narrow enough, the method returns its
/// midpoint after 0 iterations.
///
/// Nothing is computed until a [`Method`] function is used on the
/// result.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), rootcompare::Error<f64>> {
/// use rootcompare::{bisection, Method};
/// let r = bisection(|x| x * x - 2., 0., 2.).epsilon(1e-6).solve()?;
/// assert!(r.converged);
/// assert!((r.root - 2f64.sqrt()).abs() < 1e-6);
/// # Ok(()) }
/// ```
///
/// The function may also return an error, which stops the method with
/// [`Error::Fun`].
///
/// ```
/// use rootcompare::{bisection, Error, Method};
/// let f = |x: f64| if x > 0. { Ok(x.ln()) } else { Err("log of ≤ 0") };
/// assert!(matches!(bisection(f, 0., 2.).solve(),
///                  Err(Error::Fun { err: "log of ≤ 0", .. })));
/// ```
#[must_use]
pub fn bisection<T, F, R>(f: F, a: T, b: T) -> Bisection<T, F, R::Error>
where
    T: Real,
    F: FnMut(T) -> R,
    R: FloatOrError<T>,
{
    Bisection {
        f, a, b,
        error: PhantomData,
        epsilon: T::DEFAULT_EPSILON,
        maxiter: DEFAULT_MAXITER,
        state: None,
    }
}

/// Bisection method (see [`bisection`]).
pub struct Bisection<T, F, E> {
    f: F,
    a: T,
    b: T,
    error: PhantomData<E>, // Error that `f` might return
    epsilon: T,
    maxiter: usize,
    state: Option<Bracket<T>>,
}

root_finding_options!(Bisection<T, F, E>);

impl<T, F, R> Method<T> for Bisection<T, F, R::Error>
where
    T: Real,
    F: FnMut(T) -> R,
    R: FloatOrError<T>,
{
    type Error = R::Error;

    fn name(&self) -> &'static str { "bisection" }

    fn start(&mut self) -> Result<(), Error<T, R::Error>> {
        self.state = Some(Bracket::new(&mut self.f, self.a, self.b)?);
        Ok(())
    }

    fn advance(&mut self) -> Result<Flow<T>, Error<T, R::Error>> {
        let mut s = match self.state.take() {
            Some(s) => s,
            None => Bracket::new(&mut self.f, self.a, self.b)?,
        };
        let x = T::mid(s.a, s.b);
        let fx = eval_float_result(&mut self.f, x)?;
        let width = s.width();
        let step = Step { k: s.k, x, fx: Some(fx), error: width,
                          bracket: Some(s.bounds()) };
        let stop = if width < self.epsilon {
            Stop::Width
        } else if s.k >= self.maxiter {
            Stop::MaxIter
        } else {
            s.narrow(x, fx);
            s.k += 1;
            self.state = Some(s);
            return Ok(Flow::Continue(step))
        };
        let report = Report::new(stop, x, s.k, Some(fx.abs()), width,
                                 Some(s.bounds()));
        Ok(Flow::Stop(step, report))
    }
}

/// Find a root of the function `f` on the interval \[`a`, `b`\]
/// assuming `f(a)` and `f(b)` have opposite signs and `f` is
/// continuous, using the false position (regula falsi) method.
///
/// Starting the method when `f(a)·f(b) < 0` does *not* hold returns
/// the error [`Error::InvalidBracket`] before any iteration.
///
/// Each iteration computes `x = (a·f(b) − b·f(a)) / (f(b) − f(a))`.
/// As for [`bisection`], the method stops if the width of the bracket
/// is `< epsilon`; otherwise the bracket is narrowed with the same
/// rule and the method also stops if `|x − x_prev| < epsilon` where
/// `x_prev` is the previous iterate (initially `a`).  The reported
/// error is whichever of the two quantities triggered the stop (see
/// [`Report::stop`]).
///
/// The second criterion matters: on a convex or concave function one
/// bound of the bracket never moves so the width does not go to 0
/// while the iterates still converge.  This stopping rule differs
/// from that of [`bisection`] on purpose; iteration counts of the two
/// methods are therefore not directly comparable.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), rootcompare::Error<f64>> {
/// use rootcompare::{false_position, Method, Stop};
/// let r = false_position(|x| x * x - 2., 0., 2.).epsilon(1e-9).solve()?;
/// assert_eq!(r.stop, Stop::Delta);
/// assert!((r.root - 2f64.sqrt()).abs() < 1e-8);
/// # Ok(()) }
/// ```
#[must_use]
pub fn false_position<T, F, R>(
    f: F, a: T, b: T
) -> FalsePosition<T, F, R::Error>
where
    T: Real,
    F: FnMut(T) -> R,
    R: FloatOrError<T>,
{
    FalsePosition {
        f, a, b,
        error: PhantomData,
        epsilon: T::DEFAULT_EPSILON,
        maxiter: DEFAULT_MAXITER,
        state: None,
    }
}

/// False position method (see [`false_position`]).
pub struct FalsePosition<T, F, E> {
    f: F,
    a: T,
    b: T,
    error: PhantomData<E>,
    epsilon: T,
    maxiter: usize,
    state: Option<Bracket<T>>,
}

root_finding_options!(FalsePosition<T, F, E>);

impl<T, F, R> Method<T> for FalsePosition<T, F, R::Error>
where
    T: Real,
    F: FnMut(T) -> R,
    R: FloatOrError<T>,
{
    type Error = R::Error;

    fn name(&self) -> &'static str { "false position" }

    fn start(&mut self) -> Result<(), Error<T, R::Error>> {
        self.state = Some(Bracket::new(&mut self.f, self.a, self.b)?);
        Ok(())
    }

    fn advance(&mut self) -> Result<Flow<T>, Error<T, R::Error>> {
        let mut s = match self.state.take() {
            Some(s) => s,
            None => Bracket::new(&mut self.f, self.a, self.b)?,
        };
        let k = s.k;
        let bracket = s.bounds();
        let x = (s.a * s.fb - s.b * s.fa) / (s.fb - s.fa);
        let fx = eval_float_result(&mut self.f, x)?;
        let width = s.width();
        if width < self.epsilon || k >= self.maxiter {
            let stop = if width < self.epsilon { Stop::Width }
                       else { Stop::MaxIter };
            let step = Step { k, x, fx: Some(fx), error: width,
                              bracket: Some(bracket) };
            let report = Report::new(stop, x, k, Some(fx.abs()), width,
                                     Some(bracket));
            return Ok(Flow::Stop(step, report))
        }
        s.narrow(x, fx);
        s.k += 1;
        let delta = (x - s.x_prev).abs();
        let step = Step { k, x, fx: Some(fx), error: delta,
                          bracket: Some(bracket) };
        if delta < self.epsilon {
            let report = Report::new(Stop::Delta, x, s.k, Some(fx.abs()),
                                     delta, Some(s.bounds()));
            return Ok(Flow::Stop(step, report))
        }
        s.x_prev = x;
        self.state = Some(s);
        Ok(Flow::Continue(step))
    }
}

/// Number of bisection iterations guaranteeing that the bracket
/// \[`a`, `b`\] shrinks below `epsilon`, that is
/// ⌈(log₁₀|b − a| − log₁₀ ε) / log₁₀ 2⌉ (0 if the bracket is
/// already narrow enough).
///
/// ```
/// use rootcompare::bisection_min_iterations;
/// assert_eq!(bisection_min_iterations(0., 2., 1e-6), 21);
/// assert_eq!(bisection_min_iterations(0., 1e-7, 1e-6), 0);
/// ```
pub fn bisection_min_iterations<T: Real>(a: T, b: T, epsilon: T) -> usize {
    let width = (b - a).abs().to_f64();
    let n = (width.log10() - epsilon.to_f64().log10()) / 2f64.log10();
    if n > 0. { n.ceil() as usize } else { 0 }
}

////////////////////////////////////////////////////////////////////////
//
// Fixed point

/// Approximate a fixed point `x = phi(x)` of the iteration function
/// `phi` by the sequence xₖ₊₁ = phi(xₖ) started at `x0`.
///
/// The method stops when `|xₖ₊₁ − xₖ| < epsilon`.  It does not check
/// that `phi` is a contraction near the fixed point: if the sequence
/// does not converge, the maximum number of iterations is simply
/// exhausted and the report says `converged: false`.  Since only
/// `phi` is known, [`Report::residual`] is `None`.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), rootcompare::Error<f64>> {
/// use rootcompare::{fixed_point, Method};
/// let r = fixed_point(|x: f64| x.cos(), 1.).epsilon(1e-10).solve()?;
/// assert!(r.converged && r.residual.is_none());
/// assert!((r.root - 0.7390851332151607).abs() < 1e-9);
/// # Ok(()) }
/// ```
#[must_use]
pub fn fixed_point<T, F, R>(phi: F, x0: T) -> FixedPoint<T, F, R::Error>
where
    T: Real,
    F: FnMut(T) -> R,
    R: FloatOrError<T>,
{
    FixedPoint {
        phi, x0,
        error: PhantomData,
        epsilon: T::DEFAULT_EPSILON,
        maxiter: DEFAULT_MAXITER,
        state: None,
    }
}

/// Fixed point iteration (see [`fixed_point`]).
pub struct FixedPoint<T, F, E> {
    phi: F,
    x0: T,
    error: PhantomData<E>,
    epsilon: T,
    maxiter: usize,
    state: Option<(usize, T)>, // (k, xₖ)
}

root_finding_options!(FixedPoint<T, F, E>);

impl<T, F, R> Method<T> for FixedPoint<T, F, R::Error>
where
    T: Real,
    F: FnMut(T) -> R,
    R: FloatOrError<T>,
{
    type Error = R::Error;

    fn name(&self) -> &'static str { "fixed point" }

    fn start(&mut self) -> Result<(), Error<T, R::Error>> {
        self.state = Some((0, self.x0));
        Ok(())
    }

    fn advance(&mut self) -> Result<Flow<T>, Error<T, R::Error>> {
        let (k, x0) = self.state.take().unwrap_or((0, self.x0));
        let x1 = eval_float_result(&mut self.phi, x0)?;
        let delta = (x1 - x0).abs();
        let step = Step { k, x: x1, fx: None, error: delta, bracket: None };
        let stop = if delta < self.epsilon {
            Stop::Delta
        } else if k >= self.maxiter {
            Stop::MaxIter
        } else {
            self.state = Some((k + 1, x1));
            return Ok(Flow::Continue(step))
        };
        Ok(Flow::Stop(step, Report::new(stop, x1, k, None, delta, None)))
    }
}

////////////////////////////////////////////////////////////////////////
//
// Newton-Raphson

/// State of Newton's methods: iteration number, current iterate and
/// the value of the function there.
#[derive(Clone, Copy)]
struct Tangent<T> {
    k: usize,
    x: T,
    fx: T,
}

impl<T: Real> Tangent<T> {
    /// Examine the new iterate `x` (with `fx` = f(`x`)) computed from
    /// `self`.  Return the flow and, if the method goes on, the next
    /// state.
    #[inline]
    fn next(self, x: T, fx: T, epsilon: T, maxiter: usize)
            -> (Flow<T>, Option<Self>) {
        let delta = (x - self.x).abs();
        let step = Step { k: self.k, x, fx: Some(fx), error: delta,
                          bracket: None };
        let stop = if delta < epsilon {
            Stop::Delta
        } else if self.k >= maxiter {
            Stop::MaxIter
        } else {
            let next = Tangent { k: self.k + 1, x, fx };
            return (Flow::Continue(step), Some(next))
        };
        let report = Report::new(stop, x, self.k, Some(fx.abs()), delta, None);
        (Flow::Stop(step, report), None)
    }
}

/// Find a root of `f`, whose derivative is `df`, with the
/// Newton-Raphson method started at `x0`.
///
/// Each iteration computes `x = x0 − f(x0)/df(x0)` and stops when
/// `|x − x0| < epsilon`.  It is the caller's responsibility that `df`
/// does not vanish along the iterations: a zero derivative is *not*
/// trapped, the resulting infinite or NaN values propagate and the
/// method runs until the maximum number of iterations.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), rootcompare::Error<f64>> {
/// use rootcompare::{newton_raphson, Method};
/// let r = newton_raphson(|x| x * x - 2., |x| 2. * x, 1.)
///     .epsilon(1e-10).solve()?;
/// assert!((r.root - 2f64.sqrt()).abs() < 1e-15);
/// # Ok(()) }
/// ```
#[must_use]
pub fn newton_raphson<T, F, D, R>(
    f: F, df: D, x0: T
) -> NewtonRaphson<T, F, D, R::Error>
where
    T: Real,
    F: FnMut(T) -> R,
    D: FnMut(T) -> R,
    R: FloatOrError<T>,
{
    NewtonRaphson {
        f, df, x0,
        error: PhantomData,
        epsilon: T::DEFAULT_EPSILON,
        maxiter: DEFAULT_MAXITER,
        state: None,
    }
}

/// Newton-Raphson method (see [`newton_raphson`]).
pub struct NewtonRaphson<T, F, D, E> {
    f: F,
    df: D,
    x0: T,
    error: PhantomData<E>,
    epsilon: T,
    maxiter: usize,
    state: Option<Tangent<T>>,
}

root_finding_options!(NewtonRaphson<T, F, D, E>);

impl<T, F, D, R> NewtonRaphson<T, F, D, R::Error>
where
    T: Real,
    F: FnMut(T) -> R,
    D: FnMut(T) -> R,
    R: FloatOrError<T>,
{
    fn init(&mut self) -> Result<Tangent<T>, Error<T, R::Error>> {
        let fx = eval_float_result(&mut self.f, self.x0)?;
        Ok(Tangent { k: 0, x: self.x0, fx })
    }
}

impl<T, F, D, R> Method<T> for NewtonRaphson<T, F, D, R::Error>
where
    T: Real,
    F: FnMut(T) -> R,
    D: FnMut(T) -> R,
    R: FloatOrError<T>,
{
    type Error = R::Error;

    fn name(&self) -> &'static str { "Newton-Raphson" }

    fn start(&mut self) -> Result<(), Error<T, R::Error>> {
        self.state = Some(self.init()?);
        Ok(())
    }

    fn advance(&mut self) -> Result<Flow<T>, Error<T, R::Error>> {
        let s = match self.state.take() {
            Some(s) => s,
            None => self.init()?,
        };
        let dfx = eval_float_result(&mut self.df, s.x)?;
        let x = s.x - s.fx / dfx;
        let fx = eval_float_result(&mut self.f, x)?;
        let (flow, next) = s.next(x, fx, self.epsilon, self.maxiter);
        self.state = next;
        Ok(flow)
    }
}

////////////////////////////////////////////////////////////////////////
//
// Secant

/// Find a root of `f` with the secant method started at `x0` and
/// `x1`.
///
/// Each iteration first checks whether `f(x1) = f(x0)` (exact
/// floating point equality).  In that case the secant is horizontal,
/// the method cannot proceed and stops at once reporting
/// `converged: true` with [`Stop::FlatSecant`], whether or not the
/// tolerance was reached.  Otherwise it stops if `|x1 − x0| <
/// epsilon` and, if not, moves to `x0 ← x1`, `x1 ← (x0·f(x1) −
/// x1·f(x0)) / (f(x1) − f(x0))`.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), rootcompare::Error<f64>> {
/// use rootcompare::{secant, Method, Stop};
/// let r = secant(|x| x * x - 2., 1., 2.).epsilon(1e-10).solve()?;
/// assert!((r.root - 2f64.sqrt()).abs() < 1e-12);
/// let r = secant(|_| 1., 1., 2.).solve()?;
/// assert_eq!((r.stop, r.converged, r.iterations), (Stop::FlatSecant, true, 0));
/// # Ok(()) }
/// ```
#[must_use]
pub fn secant<T, F, R>(f: F, x0: T, x1: T) -> Secant<T, F, R::Error>
where
    T: Real,
    F: FnMut(T) -> R,
    R: FloatOrError<T>,
{
    Secant {
        f, x0, x1,
        error: PhantomData,
        epsilon: T::DEFAULT_EPSILON,
        maxiter: DEFAULT_MAXITER,
        state: None,
    }
}

/// Secant method (see [`secant`]).
pub struct Secant<T, F, E> {
    f: F,
    x0: T,
    x1: T,
    error: PhantomData<E>,
    epsilon: T,
    maxiter: usize,
    state: Option<Chord<T>>,
}

#[derive(Clone, Copy)]
struct Chord<T> {
    k: usize,
    x0: T,
    x1: T,
    f0: T,
    f1: T,
}

root_finding_options!(Secant<T, F, E>);

impl<T, F, R> Secant<T, F, R::Error>
where
    T: Real,
    F: FnMut(T) -> R,
    R: FloatOrError<T>,
{
    fn init(&mut self) -> Result<Chord<T>, Error<T, R::Error>> {
        let f0 = eval_float_result(&mut self.f, self.x0)?;
        let f1 = eval_float_result(&mut self.f, self.x1)?;
        Ok(Chord { k: 0, x0: self.x0, x1: self.x1, f0, f1 })
    }
}

impl<T, F, R> Method<T> for Secant<T, F, R::Error>
where
    T: Real,
    F: FnMut(T) -> R,
    R: FloatOrError<T>,
{
    type Error = R::Error;

    fn name(&self) -> &'static str { "secant" }

    fn start(&mut self) -> Result<(), Error<T, R::Error>> {
        self.state = Some(self.init()?);
        Ok(())
    }

    fn advance(&mut self) -> Result<Flow<T>, Error<T, R::Error>> {
        let s = match self.state.take() {
            Some(s) => s,
            None => self.init()?,
        };
        let delta = (s.x1 - s.x0).abs();
        let step = Step { k: s.k, x: s.x1, fx: Some(s.f1), error: delta,
                          bracket: None };
        let stop = if s.f1 == s.f0 {
            Stop::FlatSecant
        } else if delta < self.epsilon {
            Stop::Delta
        } else if s.k >= self.maxiter {
            Stop::MaxIter
        } else {
            let x2 = (s.x0 * s.f1 - s.x1 * s.f0) / (s.f1 - s.f0);
            let f2 = eval_float_result(&mut self.f, x2)?;
            self.state = Some(Chord { k: s.k + 1, x0: s.x1, x1: x2,
                                      f0: s.f1, f1: f2 });
            return Ok(Flow::Continue(step))
        };
        let report = Report::new(stop, s.x1, s.k, Some(s.f1.abs()), delta,
                                 None);
        Ok(Flow::Stop(step, report))
    }
}

////////////////////////////////////////////////////////////////////////
//
// Polynomials

/// Evaluate at `x` the polynomial with coefficients `coeffs`, given
/// from the highest to the lowest degree, using Horner's method.
/// The empty polynomial is 0.
///
/// ```
/// use rootcompare::eval_polynomial;
/// assert_eq!(eval_polynomial(&[1., 0., -1.], 3.), 8.); // x² − 1
/// ```
#[inline]
pub fn eval_polynomial<T: Real>(coeffs: &[T], x: T) -> T {
    coeffs.iter().fold(T::ZERO, |y, &c| c + y * x)
}

/// Coefficients, highest degree first, of the derivative of the
/// polynomial with coefficients `coeffs`: `coeffs[i]` is multiplied
/// by its degree `n − i` where `n = coeffs.len() − 1`, and the
/// constant term is dropped.
pub fn derivative_coeffs<T: Real>(coeffs: &[T]) -> Vec<T> {
    let n = coeffs.len().saturating_sub(1);
    coeffs[..n].iter().enumerate()
        .map(|(i, &c)| c * T::from_usize(n - i))
        .collect()
}

/// Evaluate at `x` the derivative of the polynomial with coefficients
/// `coeffs` (see [`derivative_coeffs`]).
///
/// ```
/// use rootcompare::eval_derivative_polynomial;
/// assert_eq!(eval_derivative_polynomial(&[1., 0., -1.], 3.), 6.); // 2x
/// ```
pub fn eval_derivative_polynomial<T: Real>(coeffs: &[T], x: T) -> T {
    eval_polynomial(&derivative_coeffs(coeffs), x)
}

/// Find a root of the polynomial with coefficients `coeffs` (highest
/// degree first) with the Newton-Raphson method started at `x0`.
///
/// The polynomial and its derivative are evaluated with Horner's
/// method (see [`eval_polynomial`]).  The iteration and stopping rule
/// are those of [`newton_raphson`], including the absence of a guard
/// against a vanishing derivative.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), rootcompare::Error<f64>> {
/// use rootcompare::{polynomial_newton_raphson, Method};
/// // x³ − 2x − 5
/// let r = polynomial_newton_raphson(&[1., 0., -2., -5.], 2.)
///     .epsilon(1e-12).solve()?;
/// assert!((r.root - 2.0945514815423265).abs() < 1e-12);
/// # Ok(()) }
/// ```
#[must_use]
pub fn polynomial_newton_raphson<T: Real>(
    coeffs: &[T], x0: T
) -> PolynomialNewtonRaphson<T> {
    PolynomialNewtonRaphson {
        coeffs: coeffs.to_vec(),
        dcoeffs: derivative_coeffs(coeffs),
        x0,
        epsilon: T::DEFAULT_EPSILON,
        maxiter: DEFAULT_MAXITER,
        state: None,
    }
}

/// Newton-Raphson method for polynomials (see
/// [`polynomial_newton_raphson`]).
pub struct PolynomialNewtonRaphson<T> {
    coeffs: Vec<T>,
    dcoeffs: Vec<T>,
    x0: T,
    epsilon: T,
    maxiter: usize,
    state: Option<Tangent<T>>,
}

root_finding_options!(PolynomialNewtonRaphson<T>);

impl<T: Real> PolynomialNewtonRaphson<T> {
    /// Coefficients of the polynomial, highest degree first.
    pub fn coeffs(&self) -> &[T] { &self.coeffs }

    fn init(&self) -> Tangent<T> {
        Tangent { k: 0, x: self.x0, fx: eval_polynomial(&self.coeffs, self.x0) }
    }
}

impl<T: Real> Method<T> for PolynomialNewtonRaphson<T> {
    type Error = NoError;

    fn name(&self) -> &'static str { "polynomial Newton-Raphson" }

    fn start(&mut self) -> Result<(), Error<T>> {
        self.state = Some(self.init());
        Ok(())
    }

    fn advance(&mut self) -> Result<Flow<T>, Error<T>> {
        let s = match self.state.take() {
            Some(s) => s,
            None => self.init(),
        };
        let x = s.x - s.fx / eval_polynomial(&self.dcoeffs, s.x);
        let fx = eval_polynomial(&self.coeffs, x);
        let (flow, next) = s.next(x, fx, self.epsilon, self.maxiter);
        self.state = next;
        Ok(flow)
    }
}

////////////////////////////////////////////////////////////////////////
//
// Tests

#[cfg(test)]
macro_rules! assert_approx_eq {
    ($a: expr, $b: expr, $err: expr) => {{
        let a = $a;
        let b = $b;
        if ! ((a.clone() - b.clone()).abs() <= $err) {
            panic!("|left - right| ≤ {:e}\n  left: {}\n right: {}",
                   $err, a, b);
        }
    }}
}


#[cfg(test)]
mod tests {
    use std::{cell::Cell, f64::consts::SQRT_2};
    use rand::prelude::*;
    use crate as rootcompare;
    use crate::{Error, Method, NoError, Stop};

    type R<T> = Result<(), rootcompare::Error<T, NoError>>;

    #[test]
    fn error_is_static() {
        // Compile time test.
        fn _f(x: f64) -> Result<(), Box<dyn std::error::Error + 'static>> {
            Err(Box::new(Error::<_, NoError>::InvalidBracket {
                a: x, fa: x, b: x, fb: x }))
        }
    }

    #[test]
    fn bisection_sqrt2() -> R<f64> {
        let f = |x| x * x - 2.;
        let r = rootcompare::bisection(f, 0., 2.).epsilon(1e-6).solve()?;
        assert!(r.converged);
        assert_eq!(r.stop, Stop::Width);
        assert_approx_eq!(r.root, 1.41421356, 1e-6);
        assert!(r.error < 1e-6);
        assert_approx_eq!(r.residual.unwrap(), (r.root * r.root - 2.).abs(),
                          0.);
        // 2 / 2²¹ < 1e-6 ≤ 2 / 2²⁰
        assert_eq!(r.iterations, 21);
        Ok(())
    }

    #[test]
    fn bisection_invalid_bracket() {
        let n = Cell::new(0);
        let f = |x: f64| { n.set(n.get() + 1); x };
        match rootcompare::bisection(f, 1., 2.).solve() {
            Err(Error::InvalidBracket { a, fa, b, fb }) => {
                assert_eq!((a, fa, b, fb), (1., 1., 2., 2.));
            }
            r => panic!("expected an invalid bracket, got {:?}", r),
        }
        // Only the bounds were evaluated.
        assert_eq!(n.get(), 2);
        assert!(matches!(rootcompare::bisection(f, 1., 2.).steps(),
                         Err(Error::InvalidBracket {..})));
    }

    #[test]
    fn bracket_root_at_bound_is_invalid() {
        let f = |x: f64| x * x - 1.;
        assert!(matches!(rootcompare::bisection(f, 1., 2.).solve(),
                         Err(Error::InvalidBracket {..})));
        assert!(matches!(rootcompare::false_position(f, 0., 1.).solve(),
                         Err(Error::InvalidBracket {..})));
    }

    #[test]
    fn bracket_nan() {
        let f = |x: f64| (x - 1.).sqrt();
        assert!(matches!(rootcompare::bisection(f, 0., 2.).solve(),
                         Err(Error::InvalidBracket {..})));
    }

    #[test]
    fn bracket_not_finite() {
        let f = |x: f64| x;
        assert!(matches!(
            rootcompare::bisection(f, f64::NEG_INFINITY, 1.).solve(),
            Err(Error::NotFinite {..})));
        assert!(matches!(
            rootcompare::false_position(f, -1., f64::NAN).solve(),
            Err(Error::NotFinite {..})));
    }

    #[test]
    fn bisection_narrow_initial_bracket() -> R<f64> {
        let f = |x| x - 1.;
        let r = rootcompare::bisection(f, 1. - 1e-7, 1. + 1e-7).solve()?;
        assert!(r.converged);
        assert_eq!(r.iterations, 0);
        assert_approx_eq!(r.root, 1., 1e-15);
        Ok(())
    }

    #[test]
    fn bisection_decr_bounds() -> R<f64> {
        let f = |x| x * x - 2.;
        let r = rootcompare::bisection(f, 2., 0.).epsilon(1e-10).solve()?;
        assert_approx_eq!(r.root, SQRT_2, 1e-10);
        let (a, b) = r.bracket.unwrap();
        assert!(a > b);
        let r = rootcompare::bisection(f, 0., -2.).epsilon(1e-10).solve()?;
        assert_approx_eq!(r.root, -SQRT_2, 1e-10);
        Ok(())
    }

    #[test]
    fn bisection_maxiter() -> R<f64> {
        let f = |x| x * x - 2.;
        let r = rootcompare::bisection(f, 0., 2.).epsilon(1e-12).maxiter(5)
            .solve()?;
        assert!(!r.converged);
        assert_eq!(r.stop, Stop::MaxIter);
        assert_eq!(r.iterations, 5);
        // After 5 narrowings the bracket is [1.375, 1.4375].
        assert_eq!(r.bracket, Some((1.375, 1.4375)));
        assert_eq!(r.root, 1.40625);
        assert_eq!(r.error, 0.0625);
        let r = rootcompare::bisection(f, 0., 2.).maxiter(0).solve()?;
        assert_eq!((r.converged, r.iterations, r.root), (false, 0, 1.));
        Ok(())
    }

    #[test]
    fn bisection_steps_keep_bracket() -> R<f64> {
        let f = |x: f64| x.cos() - x;
        let mut m = rootcompare::bisection(f, 0., 1.).epsilon(1e-12);
        let mut steps = m.steps()?;
        let mut n = 0;
        for s in &mut steps {
            let s = s?;
            assert_eq!(s.k, n);
            let (a, b) = s.bracket.unwrap();
            assert!(a < b);
            assert!(f(a) >= 0. && f(b) <= 0.);
            n += 1;
        }
        let r = steps.report().unwrap();
        assert_eq!(r.iterations + 1, n);
        assert_approx_eq!(r.root, 0.7390851332151607, 1e-12);
        Ok(())
    }

    #[test]
    fn bisection_f32() -> R<f32> {
        let r = rootcompare::bisection(|x: f32| x * x - 2., 0., 2.)
            .epsilon(1e-4).solve()?;
        assert!(r.converged);
        assert_approx_eq!(r.root, 2f32.sqrt(), 1e-4);
        Ok(())
    }

    #[test]
    fn epsilon_non_positive_is_default() -> R<f64> {
        let f = |x| x * x - 2.;
        let d = rootcompare::bisection(f, 0., 2.).solve()?;
        let z = rootcompare::bisection(f, 0., 2.).epsilon(0.).solve()?;
        let n = rootcompare::bisection(f, 0., 2.).epsilon(f64::NAN).solve()?;
        assert_eq!(d, z);
        assert_eq!(d, n);
        assert!(d.error < 1e-5);
        Ok(())
    }

    #[test]
    fn bisection_fun_error() {
        let f = |x: f64| if x < 1.5 { Ok(x - 1.) } else { Err(x) };
        match rootcompare::bisection(f, 0., 1.4).solve() {
            Ok(r) => assert_approx_eq!(r.root, 1., 1e-5),
            Err(e) => panic!("{}", e),
        }
        assert!(matches!(rootcompare::bisection(f, 0., 3.).solve(),
                         Err(Error::Fun { x, err }) if x == 3. && err == 3.));
    }

    #[test]
    fn bracketing_theoretical_iterations() -> R<f64> {
        let mut rng = StdRng::seed_from_u64(748);
        for _ in 0 .. 500 {
            let c: f64 = rng.gen_range(0.5 .. 50.);
            let r = c.sqrt();
            let a = rng.gen_range(0.5 * r .. r);
            let b = rng.gen_range(r .. 1.5 * r);
            let eps = 10f64.powf(-rng.gen_range(3. .. 10.));
            let n = rootcompare::bisection_min_iterations(a, b, eps);
            let f = |x| x * x - c;
            let bi = rootcompare::bisection(f, a, b).epsilon(eps).maxiter(n)
                .solve()?;
            assert!(bi.converged, "bisection {a} {b} {eps}: {bi}");
            assert!(bi.iterations <= n);
            assert!((bi.root - r).abs() < eps);
            let fp = rootcompare::false_position(f, a, b).epsilon(eps)
                .maxiter(n).solve()?;
            assert!(fp.converged, "false position {a} {b} {eps}: {fp}");
            assert!(fp.iterations <= n);
        }
        Ok(())
    }

    #[test]
    fn false_position_sqrt2() -> R<f64> {
        let f = |x| x * x - 2.;
        let r = rootcompare::false_position(f, 0., 2.).epsilon(1e-6).solve()?;
        assert!(r.converged);
        // Convex function: the bound 2 never moves.
        assert_eq!(r.stop, Stop::Delta);
        assert_eq!(r.bracket.unwrap().1, 2.);
        assert!(r.error < 1e-6);
        assert_approx_eq!(r.root, SQRT_2, 1e-6);
        Ok(())
    }

    #[test]
    fn false_position_width_stop() -> R<f64> {
        let f = |x| x - 1.;
        let r = rootcompare::false_position(f, 1. - 1e-6, 1. + 2e-6).solve()?;
        assert_eq!(r.stop, Stop::Width);
        assert_eq!(r.iterations, 0);
        assert_approx_eq!(r.error, 3e-6, 1e-15);
        Ok(())
    }

    #[test]
    fn false_position_first_delta_against_a() -> R<f64> {
        // The first iterate is compared with `a`.
        let f = |x: f64| x - 1e-7;
        let r = rootcompare::false_position(f, 0., 1.).solve()?;
        assert_eq!(r.stop, Stop::Delta);
        assert_eq!(r.iterations, 1);
        assert_approx_eq!(r.root, 1e-7, 1e-15);
        Ok(())
    }

    #[test]
    fn false_position_steps_keep_bracket() -> R<f64> {
        let f = |x: f64| x.exp() - 10.;
        let mut m = rootcompare::false_position(f, 3., 0.).epsilon(1e-12);
        for s in m.steps()? {
            let (a, b) = s?.bracket.unwrap();
            assert!(a > b);
            assert!(f(a) > 0. && f(b) <= 0.);
        }
        Ok(())
    }

    #[test]
    fn fixed_point_cos() -> R<f64> {
        let r = rootcompare::fixed_point(|x: f64| x.cos(), 1.)
            .epsilon(1e-10).solve()?;
        assert!(r.converged);
        assert_eq!(r.residual, None);
        assert!(r.error < 1e-10);
        assert_approx_eq!(r.root, 0.7390851332151607, 1e-9);
        Ok(())
    }

    #[test]
    fn fixed_point_diverges() -> R<f64> {
        let r = rootcompare::fixed_point(|x| 2. * x + 1., 0.).maxiter(10)
            .solve()?;
        assert!(!r.converged);
        assert_eq!(r.stop, Stop::MaxIter);
        assert_eq!(r.iterations, 10);
        // 11 applications of φ from 0.
        assert_eq!(r.root, 2047.);
        assert_eq!(r.error, 1024.);
        Ok(())
    }

    #[test]
    fn fixed_point_already_fixed() -> R<f64> {
        let r = rootcompare::fixed_point(|x| x, 3.).solve()?;
        assert_eq!((r.root, r.iterations, r.converged), (3., 0, true));
        Ok(())
    }

    #[test]
    fn newton_sqrt2() -> R<f64> {
        let r = rootcompare::newton_raphson(|x| x * x - 2., |x| 2. * x, 1.)
            .epsilon(1e-10).solve()?;
        assert!(r.converged);
        assert!(r.iterations <= 6);
        assert_approx_eq!(r.root, 1.4142135623730951, 1e-15);
        assert!(r.residual.unwrap() < 1e-15);
        Ok(())
    }

    #[test]
    fn newton_quadratic_convergence() -> R<f64> {
        let mut m = rootcompare::newton_raphson(
            |x| x * x - 2., |x| 2. * x, 1.).epsilon(1e-14);
        let mut e = (1. - SQRT_2).abs();
        for s in m.steps()? {
            let e1 = (s?.x - SQRT_2).abs();
            if e > 1e-7 {
                assert!(e1 <= e * e, "{e1:e} > {e:e}²");
            }
            e = e1;
        }
        Ok(())
    }

    #[test]
    fn newton_zero_derivative_propagates() -> R<f64> {
        let r = rootcompare::newton_raphson(|x| x * x - 2., |_| 0., 1.)
            .maxiter(20).solve()?;
        assert!(!r.converged);
        assert_eq!(r.iterations, 20);
        assert!(!r.root.is_finite());
        Ok(())
    }

    #[test]
    fn newton_fun_error() {
        let f = |x: f64| if x > 0. { Ok(x.ln()) } else { Err("domain") };
        let df = |x: f64| Ok(1. / x);
        // From 3, the first iterate is 3 − 3 ln 3 < 0.
        assert!(matches!(rootcompare::newton_raphson(f, df, 3.).solve(),
                         Err(Error::Fun { err: "domain", .. })));
    }

    #[test]
    fn secant_sqrt2() -> R<f64> {
        let r = rootcompare::secant(|x| x * x - 2., 1., 2.)
            .epsilon(1e-10).solve()?;
        assert!(r.converged);
        assert_approx_eq!(r.root, SQRT_2, 1e-14);
        Ok(())
    }

    #[test]
    fn secant_superlinear_convergence() -> R<f64> {
        let mut m = rootcompare::secant(|x| x * x - 2., 1., 2.)
            .epsilon(1e-14);
        let mut e = f64::INFINITY;
        for s in m.steps()? {
            let e1 = (s?.x - SQRT_2).abs();
            if 1e-8 < e && e < 0.1 {
                assert!(e1 <= e.powf(1.5), "{e1:e} > {e:e}^1.5");
            }
            e = e1;
        }
        Ok(())
    }

    #[test]
    fn secant_flat() -> R<f64> {
        let r = rootcompare::secant(|_| 3., 0., 1.).solve()?;
        assert!(r.converged);
        assert_eq!(r.stop, Stop::FlatSecant);
        assert_eq!(r.iterations, 0);
        assert_eq!(r.root, 1.);
        assert_eq!(r.residual, Some(3.));
        assert_eq!(r.error, 1.);
        Ok(())
    }

    #[test]
    fn secant_maxiter() -> R<f64> {
        let r = rootcompare::secant(|x: f64| x.atan(), 1.5, 2.).maxiter(4)
            .solve()?;
        assert!(!r.converged);
        assert_eq!(r.iterations, 4);
        Ok(())
    }

    #[test]
    fn polynomial_eval() {
        let p = [1., 0., -1.];
        for x in [-3., -1.5, 0., 0.25, 1., 7.] {
            assert_eq!(rootcompare::eval_polynomial(&p, x), x * x - 1.);
            assert_eq!(rootcompare::eval_derivative_polynomial(&p, x), 2. * x);
        }
        assert_eq!(rootcompare::eval_polynomial::<f64>(&[], 2.), 0.);
        assert_eq!(rootcompare::eval_polynomial(&[4.], 2.), 4.);
        assert_eq!(rootcompare::eval_derivative_polynomial(&[4.], 2.), 0.);
    }

    #[test]
    fn polynomial_derivative_coeffs() {
        assert_eq!(rootcompare::derivative_coeffs(&[3., 2., 1.]), [6., 2.]);
        assert_eq!(rootcompare::derivative_coeffs(&[1., 0., -2., -5.]),
                   [3., 0., -2.]);
        assert!(rootcompare::derivative_coeffs::<f64>(&[7.]).is_empty());
        assert!(rootcompare::derivative_coeffs::<f64>(&[]).is_empty());
    }

    #[test]
    fn polynomial_newton_matches_newton() -> R<f64> {
        let p = [1., 0., -2., -5.];
        let f = |x: f64| x * x * x - 2. * x - 5.;
        let df = |x: f64| 3. * x * x - 2.;
        let rp = rootcompare::polynomial_newton_raphson(&p, 2.)
            .epsilon(1e-12).solve()?;
        let rn = rootcompare::newton_raphson(f, df, 2.).epsilon(1e-12)
            .solve()?;
        assert!(rp.converged);
        assert_eq!(rp.iterations, rn.iterations);
        assert_approx_eq!(rp.root, rn.root, 1e-15);
        assert_approx_eq!(rp.root, 2.0945514815423265, 1e-12);
        Ok(())
    }

    #[test]
    fn polynomial_newton_zero_derivative() -> R<f64> {
        // p'(0) = 0 for x² + 1.
        let r = rootcompare::polynomial_newton_raphson(&[1., 0., 1.], 0.)
            .maxiter(3).solve()?;
        assert!(!r.converged);
        assert_eq!(r.iterations, 3);
        Ok(())
    }

    #[test]
    fn restart_gives_same_report() -> R<f64> {
        let mut m = rootcompare::secant(|x: f64| x.sin(), 3., 3.5);
        let r1 = m.solve()?;
        let r2 = m.solve()?;
        assert_eq!(r1, r2);
        Ok(())
    }

    #[test]
    fn names() {
        let f = |x: f64| x;
        assert_eq!(rootcompare::bisection(f, -1., 1.).name(), "bisection");
        assert_eq!(rootcompare::fixed_point(f, 1.).name(), "fixed point");
        assert_eq!(rootcompare::newton_raphson(f, f, 1.).name(),
                   "Newton-Raphson");
    }

    #[test]
    fn display() -> R<f64> {
        let r = rootcompare::fixed_point(|x| 0.5 * x, 1.).epsilon(0.3)
            .solve()?;
        assert_eq!(r.to_string(),
                   "root = 0.25 after 1 iterations (step below tolerance), \
                    error = 0.25");
        let e = rootcompare::bisection(|x: f64| x, 1., 2.).solve()
            .unwrap_err();
        assert!(e.to_string().starts_with("invalid bracket"));
        Ok(())
    }
}
