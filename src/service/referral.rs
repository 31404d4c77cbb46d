use rand::Rng;
use uuid::Uuid;

fn code_prefix(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(3)
        .collect::<String>()
        .to_uppercase()
}

/// `REF-` + the first three letters of the name + four random digits.
pub fn generate_referral_code(name: &str) -> String {
    let suffix = rand::rng().random_range(0..10_000);
    format!("REF-{}{:04}", code_prefix(name), suffix)
}

/// Used once the four-digit space for a prefix is crowded.
pub fn fallback_referral_code(name: &str, user_id: Uuid) -> String {
    format!(
        "REF-{}{}",
        code_prefix(name),
        user_id.simple().to_string().to_uppercase()
    )
}

pub fn generate_referral_link(base_url: &str, code: &str) -> String {
    format!("{}/register?ref={}", base_url, code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_uses_name_prefix() {
        let code = generate_referral_code("amit singh");
        assert!(code.starts_with("REF-AMI"));
        assert_eq!(code.len(), "REF-AMI".len() + 4);
        assert!(code[7..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn short_names_still_produce_codes() {
        let code = generate_referral_code("Al");
        assert!(code.starts_with("REF-AL"));
        assert_eq!(code.len(), "REF-AL".len() + 4);
    }

    #[test]
    fn fallback_code_carries_the_user_id() {
        let id = Uuid::new_v4();
        let code = fallback_referral_code("अमित", id);
        assert_eq!(code, format!("REF-{}", id.simple().to_string().to_uppercase()));
    }

    #[test]
    fn link_embeds_code() {
        assert_eq!(
            generate_referral_link("https://rfm.local", "REF-AMI0001"),
            "https://rfm.local/register?ref=REF-AMI0001"
        );
    }
}
