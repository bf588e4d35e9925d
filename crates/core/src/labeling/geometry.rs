use thiserror::Error;

/// Why a polygon string could not be reduced to coordinates.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PolygonError {
    #[error("polygon has no coordinates")]
    Empty,

    #[error("polygon has an odd number of coordinate tokens ({count})")]
    OddTokenCount { count: usize },

    #[error("polygon token `{token}` is not a finite number")]
    NonNumeric { token: String },
}

/// Mean of the x coordinates (every even-indexed token) of `points`.
///
/// `points` is `"x1 y1 x2 y2 ..."`, separated by any whitespace. The y tokens
/// must still be numeric even though they do not enter the mean.
pub fn centroid_x(points: &str) -> Result<f64, PolygonError> {
    let tokens: Vec<&str> = points.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(PolygonError::Empty);
    }
    if tokens.len() % 2 != 0 {
        return Err(PolygonError::OddTokenCount { count: tokens.len() });
    }

    let mut sum = 0.0;
    for (i, token) in tokens.iter().enumerate() {
        let value: f64 = token
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .ok_or_else(|| PolygonError::NonNumeric { token: token.to_string() })?;
        if i % 2 == 0 {
            sum += value;
        }
    }
    Ok(sum / (tokens.len() / 2) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_even_indexed_tokens() {
        assert_eq!(centroid_x("10 10 20 10 20 20 10 20"), Ok(15.0));
        assert_eq!(centroid_x("80 0 90 100"), Ok(85.0));
        assert_eq!(centroid_x("  42.5\t7\n "), Ok(42.5));
    }

    #[test]
    fn pair_order_does_not_matter_but_pair_contents_do() {
        let a = centroid_x("10 90 30 70 50 50").unwrap();
        let b = centroid_x("50 50 10 90 30 70").unwrap();
        let swapped = centroid_x("90 10 70 30 50 50").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, swapped);
    }

    #[test]
    fn rejects_malformed_polygons() {
        assert_eq!(centroid_x(""), Err(PolygonError::Empty));
        assert_eq!(centroid_x("1 2 3"), Err(PolygonError::OddTokenCount { count: 3 }));
        assert_eq!(
            centroid_x("1 2 x 4"),
            Err(PolygonError::NonNumeric { token: "x".into() })
        );
        // y tokens are validated too.
        assert_eq!(
            centroid_x("1 NaN"),
            Err(PolygonError::NonNumeric { token: "NaN".into() })
        );
    }
}
