use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// A fitted polynomial in the primitive variables of one species pair.
///
/// Implementations own their coefficients. `evaluate` returns the polynomial value and writes
/// the derivative with respect to every variable into `gradient`; both slices have length
/// [`Polynomial::arity`]. Evaluation must be pure so that one instance can be shared between
/// threads.
pub trait Polynomial: Send + Sync {
    fn arity(&self) -> usize;

    fn evaluate(&self, variables: &[f64], gradient: &mut [f64]) -> f64;
}

impl<T: Polynomial + ?Sized> Polynomial for &T {
    fn arity(&self) -> usize {
        (**self).arity()
    }

    fn evaluate(&self, variables: &[f64], gradient: &mut [f64]) -> f64 {
        (**self).evaluate(variables, gradient)
    }
}

impl<T: Polynomial + ?Sized> Polynomial for Box<T> {
    fn arity(&self) -> usize {
        (**self).arity()
    }

    fn evaluate(&self, variables: &[f64], gradient: &mut [f64]) -> f64 {
        (**self).evaluate(variables, gradient)
    }
}

impl<T: Polynomial + ?Sized> Polynomial for Arc<T> {
    fn arity(&self) -> usize {
        (**self).arity()
    }

    fn evaluate(&self, variables: &[f64], gradient: &mut [f64]) -> f64 {
        (**self).evaluate(variables, gradient)
    }
}

#[derive(Debug, Error)]
pub enum PolynomialError {
    #[error("Polynomial must have at least one variable")]
    NoVariables,
    #[error("Term {term} has {found} exponents, expected {expected}")]
    ArityMismatch {
        term: usize,
        expected: usize,
        found: usize,
    },
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Invalid value '{value}' in column '{column}' of row {row} in '{path}'")]
    InvalidField {
        path: String,
        row: usize,
        column: String,
        value: String,
    },
}

/// A sparse polynomial `sum_t c_t * prod_i x_i^(e_ti)`.
///
/// Each term only stores its non-zero exponents, so evaluating a large fitted basis touches
/// no more than the factors that actually appear.
#[derive(Debug, Clone, PartialEq)]
pub struct MonomialPolynomial {
    arity: usize,
    coefficients: Vec<f64>,
    factors: Vec<(usize, i32)>,
    offsets: Vec<usize>,
}

impl MonomialPolynomial {
    pub fn new<I, E>(arity: usize, terms: I) -> Result<Self, PolynomialError>
    where
        I: IntoIterator<Item = (f64, E)>,
        E: AsRef<[u32]>,
    {
        if arity == 0 {
            return Err(PolynomialError::NoVariables);
        }

        let mut coefficients = Vec::new();
        let mut factors = Vec::new();
        let mut offsets = vec![0];

        for (term, (coefficient, exponents)) in terms.into_iter().enumerate() {
            let exponents = exponents.as_ref();
            if exponents.len() != arity {
                return Err(PolynomialError::ArityMismatch {
                    term,
                    expected: arity,
                    found: exponents.len(),
                });
            }
            coefficients.push(coefficient);
            factors.extend(
                exponents
                    .iter()
                    .enumerate()
                    .filter(|&(_, &power)| power > 0)
                    .map(|(variable, &power)| (variable, power as i32)),
            );
            offsets.push(factors.len());
        }

        Ok(Self {
            arity,
            coefficients,
            factors,
            offsets,
        })
    }

    /// `sum_i c_i * x^(lowest_power + i)` in a single variable.
    pub fn univariate(coefficients: &[f64], lowest_power: u32) -> Self {
        let mut factors = Vec::with_capacity(coefficients.len());
        let mut offsets = Vec::with_capacity(coefficients.len() + 1);
        offsets.push(0);
        for i in 0..coefficients.len() {
            let power = lowest_power + i as u32;
            if power > 0 {
                factors.push((0, power as i32));
            }
            offsets.push(factors.len());
        }
        Self {
            arity: 1,
            coefficients: coefficients.to_vec(),
            factors,
            offsets,
        }
    }

    /// Reads a coefficient table with header `coefficient,x0,...,x{M-1}`.
    pub fn from_csv_path(path: &Path) -> Result<Self, PolynomialError> {
        let display = path.to_string_lossy().to_string();
        let file = std::fs::File::open(path).map_err(|e| PolynomialError::Io {
            path: display.clone(),
            source: e,
        })?;
        Self::from_csv_reader(file, &display)
    }

    pub fn from_csv_reader<R: Read>(reader: R, origin: &str) -> Result<Self, PolynomialError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| PolynomialError::Csv {
                path: origin.to_string(),
                source: e,
            })?
            .clone();
        let arity = headers.len().saturating_sub(1);

        let mut terms = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| PolynomialError::Csv {
                path: origin.to_string(),
                source: e,
            })?;
            let invalid = |column: usize, value: &str| PolynomialError::InvalidField {
                path: origin.to_string(),
                row: row + 1,
                column: headers.get(column).unwrap_or_default().to_string(),
                value: value.to_string(),
            };

            let coefficient_field = record.get(0).unwrap_or_default();
            let coefficient: f64 = coefficient_field
                .parse()
                .map_err(|_| invalid(0, coefficient_field))?;

            let exponents = record
                .iter()
                .enumerate()
                .skip(1)
                .map(|(column, field)| field.parse::<u32>().map_err(|_| invalid(column, field)))
                .collect::<Result<Vec<_>, _>>()?;

            terms.push((coefficient, exponents));
        }

        let polynomial = Self::new(arity, terms)?;
        debug!(
            "Loaded polynomial with {} terms in {} variables from '{}'",
            polynomial.len(),
            polynomial.arity,
            origin
        );
        Ok(polynomial)
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

impl Polynomial for MonomialPolynomial {
    fn arity(&self) -> usize {
        self.arity
    }

    fn evaluate(&self, variables: &[f64], gradient: &mut [f64]) -> f64 {
        debug_assert_eq!(variables.len(), self.arity);
        debug_assert_eq!(gradient.len(), self.arity);

        gradient.iter_mut().for_each(|g| *g = 0.0);

        let mut value = 0.0;
        for (term, &coefficient) in self.coefficients.iter().enumerate() {
            let factors = &self.factors[self.offsets[term]..self.offsets[term + 1]];

            value += factors
                .iter()
                .fold(coefficient, |acc, &(v, p)| acc * variables[v].powi(p));

            for (i, &(variable, power)) in factors.iter().enumerate() {
                let mut partial = coefficient * power as f64 * variables[variable].powi(power - 1);
                for (j, &(other, other_power)) in factors.iter().enumerate() {
                    if i != j {
                        partial *= variables[other].powi(other_power);
                    }
                }
                gradient[variable] += partial;
            }
        }
        value
    }
}
