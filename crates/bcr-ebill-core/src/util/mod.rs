pub mod date;

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
