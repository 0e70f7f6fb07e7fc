fn main() {
    if auto_analytics_codegen::build().is_err() {
        std::process::exit(1);
    }
}
