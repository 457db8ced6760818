/// Build an [`ErrorValue`](crate::ErrorValue) with a formatted message.
///
/// A cause placed after a `;` is wrapped and is not part of the format
/// arguments:
///
/// ```ignore
/// errorf!(DATABASE, "insert into {} failed", table);
/// errorf!(DATABASE, "insert into {} failed", table; io_err);
/// ```
///
/// An empty formatted message falls back to the code's default message.
#[macro_export]
macro_rules! errorf {
    ($code:expr, $fmt:literal $(, $arg:expr)* ; $cause:expr $(,)?) => {
        $crate::ErrorCode::error_fmt(
            $code,
            ::std::format_args!($fmt $(, $arg)*),
            ::std::option::Option::Some($crate::Cause::from($cause)),
        )
    };
    ($code:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::ErrorCode::error_fmt(
            $code,
            ::std::format_args!($fmt $(, $arg)*),
            ::std::option::Option::None,
        )
    };
}
