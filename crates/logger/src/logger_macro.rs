// Macros over the process-wide logger. All of them capture the call site.

#[macro_export]
macro_rules! location {
    () => {
        $crate::Location::new(::core::file!(), ::core::line!(), ::core::module_path!())
    };
}

#[macro_export]
macro_rules! message {
    ($level:expr, $($arg:tt)+) => {
        $crate::message(
            $level,
            ::core::option::Option::Some($crate::location!()),
            ::core::format_args!($($arg)+),
        )
    };
}

#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => {
        $crate::message!($crate::LogLevel::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::message!($crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::message!($crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::message!($crate::LogLevel::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! critical {
    ($($arg:tt)+) => {
        $crate::message!($crate::LogLevel::Critical, $($arg)+)
    };
}

/// Writes the formatted text to the stdout sink, verbatim, ignoring the threshold.
#[macro_export]
macro_rules! print {
    ($($arg:tt)+) => {
        $crate::print(::core::format_args!($($arg)+))
    };
}

/// Logs at `Error` and returns early with the signal, converted through `From`.
///
/// `error!(kind = SignalKind::InvalidArgument, "...")` picks the signal kind.
#[macro_export]
macro_rules! error {
    (kind = $kind:expr, $($arg:tt)+) => {
        return ::core::result::Result::Err(::core::convert::From::from(
            $crate::logger().raise(
                $kind,
                ::core::option::Option::Some($crate::location!()),
                ::core::format_args!($($arg)+),
            ),
        ))
    };
    ($($arg:tt)+) => {
        $crate::error!(kind = $crate::SignalKind::Library, $($arg)+)
    };
}

/// `error!` when the condition does not hold; the message is only formatted
/// on failure.
#[macro_export]
macro_rules! require {
    ($cond:expr, kind = $kind:expr, $($arg:tt)+) => {
        if !$crate::Condition::holds(&$cond) {
            $crate::error!(kind = $kind, $($arg)+);
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$crate::Condition::holds(&$cond) {
            $crate::error!($($arg)+);
        }
    };
}
