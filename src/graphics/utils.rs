use gl::types::GLsizei;

/// A zeroed buffer for `glGet*InfoLog` to write into.
pub fn info_log_buffer(capacity: usize) -> Vec<u8> {
    vec![0; capacity.max(1)]
}

/// Turns what the driver wrote into a `String`. `written` excludes the NUL terminator, but some
/// drivers report 0 and NUL-terminate anyway, so fall back to scanning for it.
pub fn info_log_to_string(buf: &[u8], written: GLsizei) -> String {
    let len = if written > 0 {
        (written as usize).min(buf.len())
    } else {
        buf.iter().position(|&b| b == 0).unwrap_or(buf.len())
    };

    String::from_utf8_lossy(&buf[..len]).into_owned()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn log_uses_reported_length() {
        let mut buf = info_log_buffer(16);
        buf[..5].copy_from_slice(b"error");

        assert_eq!(info_log_to_string(&buf, 5), "error");
    }

    #[test]
    fn log_falls_back_to_nul_terminator() {
        let mut buf = info_log_buffer(16);
        buf[..4].copy_from_slice(b"oops");

        assert_eq!(info_log_to_string(&buf, 0), "oops");
    }

    #[test]
    fn overlong_length_is_clamped() {
        let buf = info_log_buffer(4);

        assert_eq!(info_log_to_string(&buf, 1024).len(), 4);
    }
}
