use env_defs::DeployerError;
use rand::seq::SliceRandom;
use rand::Rng;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const NUMBERS: &[u8] = b"0123456789";
const SPECIAL: &[u8] = b"!@#$%^&*()_+-=[]{}|:;?.,";

/// Character classes and length bounds for a generated secret.
#[derive(Clone, Debug, PartialEq)]
pub struct PasswordOptions {
    pub upper_case_alpha: bool,
    pub lower_case_alpha: bool,
    pub number: bool,
    pub special_character: bool,
    pub minimum_length: usize,
    pub maximum_length: usize,
}

impl PasswordOptions {
    /// Lowercase letters and digits, exactly `length` characters.
    pub fn lowercase_alphanumeric(length: usize) -> Self {
        PasswordOptions {
            upper_case_alpha: false,
            lower_case_alpha: true,
            number: true,
            special_character: false,
            minimum_length: length,
            maximum_length: length,
        }
    }

    pub fn strong(minimum_length: usize, maximum_length: usize) -> Self {
        PasswordOptions {
            upper_case_alpha: true,
            lower_case_alpha: true,
            number: true,
            special_character: true,
            minimum_length,
            maximum_length,
        }
    }

    fn classes(&self) -> Vec<&'static [u8]> {
        let mut classes = vec![];
        if self.upper_case_alpha {
            classes.push(UPPERCASE);
        }
        if self.lower_case_alpha {
            classes.push(LOWERCASE);
        }
        if self.number {
            classes.push(NUMBERS);
        }
        if self.special_character {
            classes.push(SPECIAL);
        }
        classes
    }
}

/// Generates a random string honoring `options`.
///
/// The length is drawn uniformly from `minimum_length..=maximum_length` and
/// every enabled class contributes at least one character.
pub fn generate_password(options: &PasswordOptions) -> Result<String, DeployerError> {
    let classes = options.classes();
    if classes.is_empty() {
        return Err(DeployerError::InvalidPasswordOptions(
            "at least one character class must be enabled".to_string(),
        ));
    }
    if options.minimum_length > options.maximum_length {
        return Err(DeployerError::InvalidPasswordOptions(format!(
            "minimum length {} exceeds maximum length {}",
            options.minimum_length, options.maximum_length
        )));
    }
    if options.minimum_length < classes.len() {
        return Err(DeployerError::InvalidPasswordOptions(format!(
            "minimum length {} cannot fit {} character classes",
            options.minimum_length,
            classes.len()
        )));
    }

    let mut rng = rand::thread_rng();
    let length = rng.gen_range(options.minimum_length..=options.maximum_length);
    let pool: Vec<u8> = classes.iter().flat_map(|class| class.iter().copied()).collect();

    let mut chars: Vec<u8> = Vec::with_capacity(length);
    for class in &classes {
        if let Some(c) = class.choose(&mut rng) {
            chars.push(*c);
        }
    }
    while chars.len() < length {
        if let Some(c) = pool.choose(&mut rng) {
            chars.push(*c);
        }
    }
    chars.shuffle(&mut rng);

    Ok(chars.into_iter().map(char::from).collect())
}

/// SQL administrator login: `sa` followed by 8 lowercase letters and digits.
pub fn get_rnd_admin_account() -> Result<String, DeployerError> {
    let generated = generate_password(&PasswordOptions::lowercase_alphanumeric(8))?;
    Ok(format!("sa{}", generated))
}

/// Suffix that makes a bot id unique: 8 lowercase letters and digits.
pub fn get_rnd_bot_id() -> Result<String, DeployerError> {
    generate_password(&PasswordOptions::lowercase_alphanumeric(8))
}

/// Mixed case, digits and symbols, 8 to 14 characters.
pub fn get_rnd_password() -> Result<String, DeployerError> {
    generate_password(&PasswordOptions::strong(8, 14))
}
