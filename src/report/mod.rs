pub mod text;

pub fn format_f64_2(v: f64) -> String {
    format!("{:.2}", v)
}
