//! ---
//! uikit_section: "03-logging"
//! uikit_subsection: "module"
//! uikit_type: "source"
//! uikit_scope: "code"
//! uikit_description: "Structured logging context and macros."
//! uikit_version: "v0.0.0-prealpha"
//! uikit_owner: "tbd"
//! ---
/// Emit an informational log enriched with UI-Kit context.
#[macro_export]
macro_rules! uikit_info {
    (context = $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            tracing::Level::INFO,
            component = ctx.component.unwrap_or(""),
            instance = ctx.instance.unwrap_or(""),
            delay_ms = ctx.delay_ms.unwrap_or_default(),
            message = %format_args!($($arg)+)
        );
    }};
    ($($arg:tt)+) => {{
        let ctx = &$crate::LogContext::default();
        tracing::event!(
            tracing::Level::INFO,
            component = ctx.component.unwrap_or(""),
            instance = ctx.instance.unwrap_or(""),
            delay_ms = ctx.delay_ms.unwrap_or_default(),
            message = %format_args!($($arg)+)
        );
    }};
}

/// Emit a debug log enriched with UI-Kit context.
#[macro_export]
macro_rules! uikit_debug {
    (context = $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            tracing::Level::DEBUG,
            component = ctx.component.unwrap_or(""),
            instance = ctx.instance.unwrap_or(""),
            delay_ms = ctx.delay_ms.unwrap_or_default(),
            message = %format_args!($($arg)+)
        );
    }};
    ($($arg:tt)+) => {{
        let ctx = &$crate::LogContext::default();
        tracing::event!(
            tracing::Level::DEBUG,
            component = ctx.component.unwrap_or(""),
            instance = ctx.instance.unwrap_or(""),
            delay_ms = ctx.delay_ms.unwrap_or_default(),
            message = %format_args!($($arg)+)
        );
    }};
}

/// Emit an error log enriched with UI-Kit context.
#[macro_export]
macro_rules! uikit_error {
    (context = $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            tracing::Level::ERROR,
            component = ctx.component.unwrap_or(""),
            instance = ctx.instance.unwrap_or(""),
            delay_ms = ctx.delay_ms.unwrap_or_default(),
            message = %format_args!($($arg)+)
        );
    }};
    ($($arg:tt)+) => {{
        let ctx = &$crate::LogContext::default();
        tracing::event!(
            tracing::Level::ERROR,
            component = ctx.component.unwrap_or(""),
            instance = ctx.instance.unwrap_or(""),
            delay_ms = ctx.delay_ms.unwrap_or_default(),
            message = %format_args!($($arg)+)
        );
    }};
}
