use std::io::Write;

const PROMPT: &str = "tickdown> ";

/// Print the prompt and read one line from stdin
pub fn readline() -> Result<String, String> {
    write!(std::io::stdout(), "{PROMPT}").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())?;

    let mut buffer = String::new();
    let read = std::io::stdin()
        .read_line(&mut buffer)
        .map_err(|e| e.to_string())?;
    if read == 0 {
        // stdin closed, behave like an explicit exit
        return Ok("exit".to_string());
    }
    Ok(buffer)
}
