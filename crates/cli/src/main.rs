fn main() -> Result<(), Box<dyn std::error::Error>> {
    prebuilt_apis_cli::run()
}
