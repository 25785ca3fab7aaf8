pub fn format_header_line(name: &str, value: &str) -> String {
    format!("{name} => {value}")
}
