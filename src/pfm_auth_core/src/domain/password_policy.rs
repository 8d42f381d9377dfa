use super::password::MIN_PASSWORD_LENGTH;

/// Substrings that mark a password as built from a well-known pattern.
pub const COMMON_PASSWORDS: [&str; 10] = [
    "password",
    "12345678",
    "qwerty",
    "abc123",
    "password123",
    "admin",
    "letmein",
    "welcome",
    "monkey",
    "dragon",
];

pub const FEEDBACK_MIN_LENGTH: &str = "Password must be at least 8 characters";
pub const FEEDBACK_UPPERCASE: &str = "Password must contain at least one uppercase letter";
pub const FEEDBACK_LOWERCASE: &str = "Password must contain at least one lowercase letter";
pub const FEEDBACK_DIGIT: &str = "Password must contain at least one number";
pub const FEEDBACK_SPECIAL: &str = "Password should contain at least one special character";
pub const FEEDBACK_COMMON: &str = "Password contains common words or patterns";

/// Result of running every strength check against one plaintext.
///
/// `score` counts the five character-class and length checks (0 to 5).
/// `is_valid` only requires length, uppercase, lowercase and digit. The
/// special-character and common-word checks lower the score and add feedback
/// without rejecting the password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordStrengthReport {
    pub min_length: bool,
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_digit: bool,
    pub has_special: bool,
    pub no_common_words: bool,
    pub score: u8,
    pub is_valid: bool,
    /// One message per failed check, in evaluation order.
    pub feedback: Vec<String>,
}

impl PasswordStrengthReport {
    /// The message shown to callers when the password is rejected.
    pub fn primary_feedback(&self) -> Option<&str> {
        self.feedback.first().map(String::as_str)
    }
}

pub fn evaluate_strength(password: &str) -> PasswordStrengthReport {
    let mut feedback = Vec::new();
    let mut score = 0u8;

    let mut check = |passed: bool, message: &str| {
        if passed {
            score += 1;
        } else {
            feedback.push(message.to_owned());
        }
        passed
    };

    let min_length = check(
        password.chars().count() >= MIN_PASSWORD_LENGTH,
        FEEDBACK_MIN_LENGTH,
    );
    let has_uppercase = check(
        password.chars().any(|c| c.is_ascii_uppercase()),
        FEEDBACK_UPPERCASE,
    );
    let has_lowercase = check(
        password.chars().any(|c| c.is_ascii_lowercase()),
        FEEDBACK_LOWERCASE,
    );
    let has_digit = check(password.chars().any(|c| c.is_ascii_digit()), FEEDBACK_DIGIT);
    let has_special = check(password.chars().any(is_special), FEEDBACK_SPECIAL);

    // The deny-list only contributes feedback; the score tops out at 5.
    let lowered = password.to_lowercase();
    let no_common_words = !COMMON_PASSWORDS.iter().any(|common| lowered.contains(common));
    if !no_common_words {
        feedback.push(FEEDBACK_COMMON.to_owned());
    }

    PasswordStrengthReport {
        min_length,
        has_uppercase,
        has_lowercase,
        has_digit,
        has_special,
        no_common_words,
        score,
        is_valid: min_length && has_uppercase && has_lowercase && has_digit,
        feedback,
    }
}

// Punctuation or symbol: anything printable that is neither alphanumeric nor whitespace.
fn is_special(c: char) -> bool {
    c.is_ascii_punctuation() || (!c.is_alphanumeric() && !c.is_whitespace() && !c.is_control())
}
