//! GL error capture around raw calls.
//!
//! The driver latches errors on a sticky flag that only `glGetError`
//! drains, so a raw call site has no idea whether *it* failed. [`gl_check`]
//! drains the flag before the call, runs it, then drains again and reports
//! every raised error with the offending expression and call site. Debug
//! builds additionally panic so the failure surfaces at the broken call
//! rather than frames later; release builds log and keep going. `Drop`
//! impls release their handles through [`gl_cleanup`], which reports the
//! same way but never panics.

use glow::HasContext;

/// Human-readable name for a `glGetError` code.
pub(crate) fn describe_gl_error(code: u32) -> &'static str {
    match code {
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => "unrecognized GL error",
    }
}

/// Drains error flags left behind by earlier, unchecked calls.
pub(crate) fn clear_gl_errors(gl: &glow::Context) {
    unsafe { while gl.get_error() != glow::NO_ERROR {} }
}

/// Drains the error flag after a call, logging each raised error with the
/// originating expression and call site. Returns whether the flag was clean.
pub(crate) fn log_gl_call(gl: &glow::Context, call: &str, file: &str, line: u32) -> bool {
    let mut clean = true;
    loop {
        let code = unsafe { gl.get_error() };
        if code == glow::NO_ERROR {
            break;
        }
        log::error!(
            "{} (0x{code:04x}) raised by {call} at {file}:{line}",
            describe_gl_error(code)
        );
        clean = false;
    }
    clean
}

/// Wraps one GL call with error draining and reporting.
///
/// Expands to the call's own return value, so wrapped getters stay usable
/// in expression position.
macro_rules! gl_check {
    ($gl:expr, $call:expr) => {{
        $crate::renderer::debug::clear_gl_errors($gl);
        #[allow(unused_unsafe)]
        let result = unsafe { $call };
        let clean = $crate::renderer::debug::log_gl_call($gl, stringify!($call), file!(), line!());
        debug_assert!(clean, "GL error raised by {}", stringify!($call));
        result
    }};
}
pub(crate) use gl_check;

/// [`gl_check!`] without the debug assertion, for `Drop` impls where a
/// panic could start while the stack is already unwinding.
macro_rules! gl_cleanup {
    ($gl:expr, $call:expr) => {{
        $crate::renderer::debug::clear_gl_errors($gl);
        #[allow(unused_unsafe)]
        let result = unsafe { $call };
        $crate::renderer::debug::log_gl_call($gl, stringify!($call), file!(), line!());
        result
    }};
}
pub(crate) use gl_cleanup;
