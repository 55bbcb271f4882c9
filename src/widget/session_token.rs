use rand::Rng;

const TOKEN_LENGTH: usize = 32;
const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Groups one autocomplete-then-select interaction for the places API's
/// billing. Rotated after every completed selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let token = std::iter::repeat_with(|| {
            TOKEN_CHARSET[rng.random_range(0..TOKEN_CHARSET.len())] as char
        })
        .take(TOKEN_LENGTH)
        .collect();

        SessionToken(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
