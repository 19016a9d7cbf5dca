use anyhow::Result;

fn main() -> Result<()> {
    keyword_cli::main_entry()
}
