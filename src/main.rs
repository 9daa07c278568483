fn main() -> Result<(), Box<dyn std::error::Error>> {
    monky_chat::cli::main()
}
