//! Start command - greets the user

pub fn execute() -> String {
    "Welcome to MediMateAI! Type /help for instructions.".to_string()
}
