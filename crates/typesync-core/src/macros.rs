//! Internal helper macros.

/// Declare a lazily-compiled, process-wide regex.
///
/// Every pattern in this crate is a hardcoded literal, so compilation can
/// only fail at development time.
macro_rules! lazy_regex {
    ($(#[$meta:meta])* $vis:vis static $name:ident = $pattern:expr;) => {
        $(#[$meta])*
        #[allow(clippy::expect_used)]
        $vis static $name: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| {
                regex::Regex::new($pattern).expect("hardcoded regex is valid")
            });
    };
}

pub(crate) use lazy_regex;
