//! UTF-16 helpers for Win32 string buffers.

/// Decodes a fixed-size buffer up to its first null.
pub fn to_string(buffer: &[u16]) -> String {
    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    String::from_utf16_lossy(&buffer[..len])
}

/// Encodes `s` as a null-terminated UTF-16 buffer.
pub fn null_terminated(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_first_null() {
        // Arrange
        let mut buffer = [0u16; 32];
        for (slot, c) in buffer.iter_mut().zip(r"\\.\DISPLAY1".encode_utf16()) {
            *slot = c;
        }

        // Act
        let s = to_string(&buffer);

        // Assert
        assert_eq!(s, r"\\.\DISPLAY1");
    }

    #[test]
    fn full_buffer_without_null_is_kept() {
        let buffer: Vec<u16> = "ABC".encode_utf16().collect();
        assert_eq!(to_string(&buffer), "ABC");
    }

    #[test]
    fn null_terminated_appends_one_zero() {
        assert_eq!(null_terminated("ab"), vec![0x61, 0x62, 0]);
    }
}
