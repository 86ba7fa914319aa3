/// Source of the random challenges a [`Server`](crate::Server) issues.
pub trait ChallengeGenerator {
    /// Produce a fresh challenge for a request made by `account_name`.
    fn generate_challenge(&self, account_name: &str) -> Vec<u8>;
}

/// Challenges of 32 bytes from the thread local CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomChallengeGenerator;

impl RandomChallengeGenerator {
    /// Length of the generated challenges.
    pub const LEN: usize = 32;
}

impl ChallengeGenerator for RandomChallengeGenerator {
    fn generate_challenge(&self, _account_name: &str) -> Vec<u8> {
        u2f_types::rand::random_vec(Self::LEN)
    }
}

impl<F> ChallengeGenerator for F
where
    F: Fn(&str) -> Vec<u8>,
{
    fn generate_challenge(&self, account_name: &str) -> Vec<u8> {
        self(account_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_challenges_differ() {
        let generator = RandomChallengeGenerator;

        let first = generator.generate_challenge("alice");
        let second = generator.generate_challenge("alice");

        assert_eq!(first.len(), RandomChallengeGenerator::LEN);
        assert_ne!(first, second);
    }

    #[test]
    fn closures_are_generators() {
        let generator = |account: &str| account.as_bytes().to_vec();

        assert_eq!(generator.generate_challenge("bob"), b"bob");
    }
}
