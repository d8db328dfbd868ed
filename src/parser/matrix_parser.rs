use winnow::{
    Parser,
    ascii::{float, space0, space1},
    combinator::separated,
    error::ContextError,
};

/// Parses one whitespace-delimited numeric value. Accepts plain decimals and
/// the scientific notation `numpy.savetxt` emits (e.g. `-9.999999900000000000e+05`).
pub fn parse_value(input: &mut &str) -> Result<f64, ContextError> {
    float.parse_next(input)
}

/// Parses a full line of whitespace-separated floats. Leading and trailing
/// blanks are tolerated; the line must contain at least one value.
pub fn parse_row(input: &mut &str) -> Result<Vec<f64>, ContextError> {
    let _ = space0.parse_next(input)?;
    let values = separated(1.., parse_value, space1).parse_next(input)?;
    let _ = space0.parse_next(input)?;
    Ok(values)
}
