//! CSS arithmetic values.
//!
//! [CSS Values Level 4 § 10 Mathematical Expressions](https://www.w3.org/TR/css-values-4/#math)
//!
//! Every numeric field of a color is an [`Expr`]. A field that is known at
//! compile time is a [`Quantity`]; anything else (a `var()` reference, an
//! unknown function) is kept as opaque CSS text and combined with other
//! values by building a `calc()` tree. The constructors fold as much as they
//! can prove, so `calc(4 + 4)` becomes `8` while `calc(var(--x) + 4)` stays
//! symbolic.

use core::fmt;

use serde::{Serialize, Serializer};

/// A literal number with an optional unit (`""` for plain numbers, `"%"`,
/// `"deg"`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    /// The numeric value.
    pub value: f64,
    /// The unit, empty for a plain `<number>`.
    pub unit: String,
}

impl Quantity {
    /// A quantity with the given unit.
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    /// Whether the quantity is a plain `<number>`.
    #[must_use]
    pub fn is_unitless(&self) -> bool {
        self.unit.is_empty()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_finite() {
            write!(f, "{}{}", format_number(self.value), self.unit)
        } else {
            // [§ 10.7.1](https://www.w3.org/TR/css-values-4/#calc-error-constants)
            let constant = if self.value.is_nan() {
                "NaN"
            } else if self.value > 0.0 {
                "infinity"
            } else {
                "-infinity"
            };
            if self.unit.is_empty() {
                write!(f, "calc({constant})")
            } else {
                write!(f, "calc({constant}*1{})", self.unit)
            }
        }
    }
}

/// A binary arithmetic operator inside `calc()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl Operator {
    const fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
        }
    }

    const fn symbol(self) -> &'static str {
        // Whitespace around + and - is mandatory inside calc().
        match self {
            Self::Add => " + ",
            Self::Sub => " - ",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

/// The comparison functions the resolver emits.
///
/// [§ 10.2 Comparison Functions](https://www.w3.org/TR/css-values-4/#comp-func)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathFunction {
    /// `min(a, b, ...)`
    Min,
    /// `max(a, b, ...)`
    Max,
    /// `clamp(min, value, max)`
    Clamp,
}

impl MathFunction {
    /// Look up a function by its (ASCII case-insensitive) CSS name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "min" => Some(Self::Min),
            "max" => Some(Self::Max),
            "clamp" => Some(Self::Clamp),
            _ => None,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::Clamp => "clamp",
        }
    }
}

/// A numeric color field: literal, symbolic, or an arithmetic tree over both.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A value known at compile time.
    Quantity(Quantity),
    /// CSS text whose value is only known at paint time, kept verbatim.
    Opaque(String),
    /// `lhs op rhs`
    Binary {
        /// The operator.
        op: Operator,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// `min()`, `max()` or `clamp()`.
    Call {
        /// The function.
        function: MathFunction,
        /// Its arguments; `clamp` always has three.
        args: Vec<Expr>,
    },
}

impl Expr {
    /// A plain number.
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Quantity(Quantity::new(value, ""))
    }

    /// A percentage.
    #[must_use]
    pub fn percent(value: f64) -> Self {
        Self::Quantity(Quantity::new(value, "%"))
    }

    /// Opaque CSS text.
    pub fn opaque(text: impl Into<String>) -> Self {
        Self::Opaque(text.into())
    }

    /// A `var()` reference to a custom property.
    #[must_use]
    pub fn var(property: &str) -> Self {
        Self::Opaque(format!("var({property})"))
    }

    /// The literal quantity, if this expression is one.
    #[must_use]
    pub const fn as_quantity(&self) -> Option<&Quantity> {
        match self {
            Self::Quantity(q) => Some(q),
            _ => None,
        }
    }

    /// The value of a unitless literal.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        self.as_quantity()
            .filter(|q| q.is_unitless())
            .map(|q| q.value)
    }

    /// Whether the expression is a literal, i.e. needs no run-time evaluation.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Quantity(_))
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Self::Quantity(_) | Self::Opaque(_) => 1,
            Self::Binary { lhs, rhs, .. } => 1 + lhs.node_count() + rhs.node_count(),
            Self::Call { args, .. } => 1 + args.iter().map(Self::node_count).sum::<usize>(),
        }
    }

    fn is_zero(&self) -> bool {
        self.as_quantity().is_some_and(|q| q.value == 0.0)
    }

    fn is_unitless(&self, value: f64) -> bool {
        self.as_number() == Some(value)
    }

    /// The unit this expression evaluates to, when that can be told without
    /// evaluating it. Opaque text has no known unit.
    #[must_use]
    pub fn known_unit(&self) -> Option<&str> {
        match self {
            Self::Quantity(q) => Some(&q.unit),
            Self::Opaque(_) => None,
            Self::Binary { op, lhs, rhs } => match op {
                Operator::Add | Operator::Sub => lhs.known_unit().or_else(|| rhs.known_unit()),
                Operator::Mul => match (lhs.known_unit(), rhs.known_unit()) {
                    (Some(""), other) | (other, Some("")) => other,
                    _ => None,
                },
                Operator::Div => match rhs.known_unit() {
                    Some("") => lhs.known_unit(),
                    _ => None,
                },
            },
            Self::Call { args, .. } => args.iter().find_map(Self::known_unit),
        }
    }

    fn binary(op: Operator, lhs: Self, rhs: Self) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// `lhs + rhs`, folded when possible.
    #[must_use]
    pub fn add(lhs: Self, rhs: Self) -> Self {
        if let (Self::Quantity(a), Self::Quantity(b)) = (&lhs, &rhs) {
            if a.unit == b.unit {
                return Self::Quantity(Quantity::new(a.value + b.value, a.unit.clone()));
            }
        }
        if rhs.is_zero() {
            return lhs;
        }
        if lhs.is_zero() {
            return rhs;
        }
        match rhs {
            Self::Quantity(q) if q.value < 0.0 => {
                Self::binary(Operator::Sub, lhs, Self::Quantity(Quantity::new(-q.value, q.unit)))
            }
            rhs => Self::binary(Operator::Add, lhs, rhs),
        }
    }

    /// `lhs - rhs`, folded when possible.
    #[must_use]
    pub fn sub(lhs: Self, rhs: Self) -> Self {
        if let (Self::Quantity(a), Self::Quantity(b)) = (&lhs, &rhs) {
            if a.unit == b.unit {
                return Self::Quantity(Quantity::new(a.value - b.value, a.unit.clone()));
            }
        }
        if rhs.is_zero() {
            return lhs;
        }
        match rhs {
            Self::Quantity(q) if q.value < 0.0 => {
                Self::binary(Operator::Add, lhs, Self::Quantity(Quantity::new(-q.value, q.unit)))
            }
            rhs => Self::binary(Operator::Sub, lhs, rhs),
        }
    }

    /// `lhs * rhs`, folded when possible.
    #[must_use]
    pub fn mul(lhs: Self, rhs: Self) -> Self {
        if let (Self::Quantity(a), Self::Quantity(b)) = (&lhs, &rhs) {
            if a.is_unitless() {
                return Self::Quantity(Quantity::new(a.value * b.value, b.unit.clone()));
            }
            if b.is_unitless() {
                return Self::Quantity(Quantity::new(a.value * b.value, a.unit.clone()));
            }
        }
        if lhs.is_unitless(1.0) {
            return rhs;
        }
        if rhs.is_unitless(1.0) {
            return lhs;
        }
        // A zero factor only collapses the product when the other side's type
        // is known; `0` and `0%` are not interchangeable inside calc().
        if lhs.is_unitless(0.0) {
            if let Some(unit) = rhs.known_unit() {
                return Self::Quantity(Quantity::new(0.0, unit));
            }
        }
        if rhs.is_unitless(0.0) {
            if let Some(unit) = lhs.known_unit() {
                return Self::Quantity(Quantity::new(0.0, unit));
            }
        }
        Self::binary(Operator::Mul, lhs, rhs)
    }

    /// `lhs / rhs`, folded when possible. Division by a literal zero is kept
    /// symbolic.
    #[must_use]
    pub fn div(lhs: Self, rhs: Self) -> Self {
        if let (Self::Quantity(a), Self::Quantity(b)) = (&lhs, &rhs) {
            if b.value != 0.0 {
                if b.is_unitless() {
                    return Self::Quantity(Quantity::new(a.value / b.value, a.unit.clone()));
                }
                if a.unit == b.unit {
                    return Self::number(a.value / b.value);
                }
            }
        }
        if rhs.is_unitless(1.0) {
            return lhs;
        }
        Self::binary(Operator::Div, lhs, rhs)
    }

    /// `clamp(min, value, max)`, folded when all three are literals of one unit.
    #[must_use]
    pub fn clamp(min: Self, value: Self, max: Self) -> Self {
        if let (Some(lo), Some(v), Some(hi)) = (min.as_quantity(), value.as_quantity(), max.as_quantity()) {
            if lo.unit == v.unit && v.unit == hi.unit {
                // [§ 10.2](https://www.w3.org/TR/css-values-4/#funcdef-clamp)
                // "clamp(MIN, VAL, MAX) is resolved as max(MIN, min(VAL, MAX))"
                return Self::Quantity(Quantity::new(lo.value.max(v.value.min(hi.value)), v.unit.clone()));
            }
        }
        Self::Call {
            function: MathFunction::Clamp,
            args: vec![min, value, max],
        }
    }

    /// `min(args...)`, folded when every argument is a literal of one unit.
    #[must_use]
    pub fn min(args: Vec<Self>) -> Self {
        Self::compare(MathFunction::Min, args)
    }

    /// `max(args...)`, folded when every argument is a literal of one unit.
    #[must_use]
    pub fn max(args: Vec<Self>) -> Self {
        Self::compare(MathFunction::Max, args)
    }

    fn compare(function: MathFunction, mut args: Vec<Self>) -> Self {
        if args.len() == 1 {
            if let Some(only) = args.pop() {
                return only;
            }
        }
        let literals: Option<Vec<&Quantity>> = args.iter().map(Self::as_quantity).collect();
        if let Some(literals) = literals {
            let mut iter = literals.into_iter();
            if let Some(first) = iter.next() {
                let mut acc = first.clone();
                let mut same_unit = true;
                for q in iter {
                    same_unit &= q.unit == acc.unit;
                    acc.value = match function {
                        MathFunction::Min => acc.value.min(q.value),
                        _ => acc.value.max(q.value),
                    };
                }
                if same_unit {
                    return Self::Quantity(acc);
                }
            }
        }
        Self::Call { function, args }
    }

    /// Rebuild the tree through the folding constructors.
    #[must_use]
    pub fn simplify(self) -> Self {
        match self {
            Self::Quantity(_) | Self::Opaque(_) => self,
            Self::Binary { op, lhs, rhs } => {
                let (lhs, rhs) = (lhs.simplify(), rhs.simplify());
                match op {
                    Operator::Add => Self::add(lhs, rhs),
                    Operator::Sub => Self::sub(lhs, rhs),
                    Operator::Mul => Self::mul(lhs, rhs),
                    Operator::Div => Self::div(lhs, rhs),
                }
            }
            Self::Call { function, args } => {
                let mut args: Vec<Self> = args.into_iter().map(Self::simplify).collect();
                match function {
                    MathFunction::Clamp if args.len() == 3 => {
                        let max = args.pop().unwrap_or_else(|| Self::number(0.0));
                        let value = args.pop().unwrap_or_else(|| Self::number(0.0));
                        let min = args.pop().unwrap_or_else(|| Self::number(0.0));
                        Self::clamp(min, value, max)
                    }
                    MathFunction::Clamp => Self::Call { function, args },
                    MathFunction::Min | MathFunction::Max => Self::compare(function, args),
                }
            }
        }
    }

    const fn precedence(&self) -> u8 {
        match self {
            Self::Binary { op, .. } => op.precedence(),
            _ => 3,
        }
    }

    /// Write the expression as it appears inside a `calc()`.
    fn write_inner(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quantity(q) => write!(f, "{q}"),
            Self::Opaque(text) => f.write_str(text),
            Self::Call { function, args } => {
                write!(f, "{}(", function.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    arg.write_inner(f)?;
                }
                f.write_str(")")
            }
            Self::Binary { op, lhs, rhs } => {
                let wrap_lhs = lhs.precedence() < op.precedence();
                let wrap_rhs = rhs.precedence() < op.precedence()
                    || (rhs.precedence() == op.precedence()
                        && matches!(op, Operator::Sub | Operator::Div));
                write_operand(f, lhs, wrap_lhs)?;
                f.write_str(op.symbol())?;
                write_operand(f, rhs, wrap_rhs)
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, wrap: bool) -> fmt::Result {
    if wrap {
        f.write_str("(")?;
        expr.write_inner(f)?;
        f.write_str(")")
    } else {
        expr.write_inner(f)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Self::Binary { .. } = self {
            f.write_str("calc(")?;
            self.write_inner(f)?;
            f.write_str(")")
        } else {
            self.write_inner(f)
        }
    }
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

/// Format a number the compact way: at most five decimals, no trailing
/// zeros, exponent notation for very large or very small magnitudes.
#[must_use]
pub fn format_number(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude == 0.0 {
        return "0".to_string();
    }
    if !(1e-4..1e15).contains(&magnitude) {
        return format!("{value:e}");
    }
    let mut formatted = format!("{value:.5}");
    while formatted.ends_with('0') {
        let _ = formatted.pop();
    }
    if formatted.ends_with('.') {
        let _ = formatted.pop();
    }
    if formatted == "-0" {
        let _ = formatted.remove(0);
    }
    formatted
}
