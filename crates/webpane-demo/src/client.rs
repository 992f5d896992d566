use webpane_browser::ClientHandler;

/// Forwards page console output to the log.
#[derive(Debug, Default)]
pub struct ConsoleLogger;

pub fn console_line(message: &str, source: &str, line: u32) -> String {
    format!("[JS Console] {message} (source: {source}, line: {line})")
}

impl ClientHandler for ConsoleLogger {
    fn on_console_message(&self, message: &str, source: &str, line: u32) {
        log::info!("{}", console_line(message, source, line));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_line_format() {
        assert_eq!(
            console_line("hi", "file:///x.html", 7),
            "[JS Console] hi (source: file:///x.html, line: 7)"
        );
    }
}
