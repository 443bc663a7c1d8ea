/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs how long it took to evaluate, and outputs the value of the
/// expression. Defaults to logging at [log::Level::Debug].
///
/// Only use this around whole-layer work. The per-cell operations are far too
/// cheap to be worth timing one at a time.
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} ms", $label, elapsed.as_millis());
        value
    }};
}

/// Parse a vector from a string of comma-separated components, e.g. `"3,-4"`.
/// Surrounding whitespace around each component is ignored.
pub fn parse_vector2<T>(s: &str) -> anyhow::Result<nalgebra::Vector2<T>>
where
    T: nalgebra::Scalar + std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let mut components = s.split(',').map(str::trim);
    match (components.next(), components.next(), components.next()) {
        (Some(x), Some(y), None) => {
            Ok(nalgebra::Vector2::new(x.parse()?, y.parse()?))
        }
        _ => Err(anyhow::anyhow!(
            "expected two comma-separated components, got {:?}",
            s
        )),
    }
}
