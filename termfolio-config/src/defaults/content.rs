fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|line| (*line).to_string()).collect()
}

pub fn script_name() -> String {
    "jared.sh".to_string()
}

pub fn prompt() -> String {
    "$ ".to_string()
}

pub fn boot_lines() -> Vec<String> {
    lines(&[
        "$ ./jared.sh",
        "running jared.sh — displaying contact info...",
        "",
        "Name: Jared Frank",
        "Profession: Creative Technologist",
        "Email: hi@jared.sh",
        "GitHub: https://github.com/jareddotsh",
        "Location: Nashville, TN",
        "",
        "Type \"help\" to see available commands.",
    ])
}

pub fn help_lines() -> Vec<String> {
    lines(&[
        "Available commands:",
        "  help        Show this message",
        "  about       About Jared",
        "  contact     Contact information",
        "  clear       Clear the terminal",
    ])
}

pub fn about_lines() -> Vec<String> {
    lines(&[
        "Jared Frank is a Creative Technologist focused on consulting and cybersecurity, coming up with creative solutions to complex problems.",
    ])
}

pub fn contact_lines() -> Vec<String> {
    lines(&[
        "Email: hi@jared.sh",
        "GitHub: https://github.com/jareddotsh",
    ])
}
