//! Reads numeric configuration values from the build environment.
//!
//! The macros are usable in `const` context, so drivers can derive their compile-time defaults
//! from `CONFIG_*` variables set by the build system. A value that cannot be parsed aborts the
//! build instead of being silently replaced by the default.

#[doc(hidden)]
pub use {const_panic, konst};

macro_rules! define_env_with_default_macro {
    ($macro_name:ident, $parse_fn_name:ident, $output_type_name:literal) => {
        #[doc = concat!(
            "Reads an environment variable at build time and parses it as ",
            $output_type_name,
            ", falling back to a default if it is not set."
        )]
        ///
        /// Compilation fails if the variable is set but cannot be parsed.
        #[macro_export]
        macro_rules! $macro_name {
            ($env_var:literal, $default:expr) => {
                if let Some(str_value) = option_env!($env_var) {
                    if let Ok(value) = $crate::env::konst::primitive::$parse_fn_name(str_value) {
                        value
                    } else {
                        $crate::env::const_panic::concat_panic!(
                            "Could not parse environment variable `",
                            $env_var,
                            "=",
                            str_value,
                            "` as ",
                            $output_type_name,
                        );
                    }
                } else {
                    $default
                }
            };
        }
    };
}

define_env_with_default_macro!(usize_from_env_or, parse_usize, "a usize");
define_env_with_default_macro!(u32_from_env_or, parse_u32, "a u32");
