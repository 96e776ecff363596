//! Context-aware logging macros.
//!
//! Each macro formats its arguments like `format!`, records the call
//! site in `EmitOptions` and evaluates to the emission `Result`.

/// Log through a `ContextLogger` at an explicit level.
#[macro_export]
macro_rules! cx_log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log(
            $level,
            &::std::format!($($arg)+),
            &$crate::backend::EmitOptions::at(
                ::std::module_path!(),
                ::std::file!(),
                ::std::line!(),
            ),
        )
    };
}

/// Log a debug message with context.
#[macro_export]
macro_rules! cx_debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::cx_log!($logger, $crate::logging::Level::Debug, $($arg)+)
    };
}

/// Log an info message with context.
#[macro_export]
macro_rules! cx_info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::cx_log!($logger, $crate::logging::Level::Info, $($arg)+)
    };
}

/// Log a warning message with context.
#[macro_export]
macro_rules! cx_warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::cx_log!($logger, $crate::logging::Level::Warning, $($arg)+)
    };
}

/// Log an error message with context.
#[macro_export]
macro_rules! cx_error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::cx_log!($logger, $crate::logging::Level::Error, $($arg)+)
    };
}

/// Log a critical message with context.
#[macro_export]
macro_rules! cx_critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::cx_log!($logger, $crate::logging::Level::Critical, $($arg)+)
    };
}
