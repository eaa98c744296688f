// Macros to instrument future spans.

#[doc(hidden)]
#[macro_export]
macro_rules! __relay_instrument_internal {
    ($trace_type:ident; $fut:expr, $($element:expr),*) => {{
        #[cfg(feature = "tracing")]
        {
            $crate::tracing::Instrument::instrument($fut, $crate::tracing::$trace_type!($($element),*))
        }
        #[cfg(not(feature = "tracing"))]
        {
            $fut
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __relay_instrument_trace {
    ($fut:expr, $($element:expr),*) => {{
        $crate::__relay_instrument_internal!(trace_span; $fut, $($element),*)
    }}
}

// Macros to instrument events.

#[doc(hidden)]
#[macro_export]
macro_rules! __relay_trace_internal {
    ($trace_type:ident; $($element:expr),*) => {{
        #[cfg(feature = "tracing")]
        {
            $crate::tracing::$trace_type!($($element),*);
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __relay_trace {
    ($($element:expr),*) => {{
        $crate::__relay_trace_internal!(trace; $($element),*)
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __relay_trace_debug {
    ($($element:expr),*) => {{
        $crate::__relay_trace_internal!(debug; $($element),*)
    }};
}
