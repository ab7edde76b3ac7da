use derive_more::{Deref, Display, Into};
use uuid::Uuid;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LENGTH: usize = 8;

/// Generate a short identifier for nodes created on the client.
///
/// The identifier consists of eight characters drawn from `[0-9a-z]`. Collisions are unlikely for
/// the few dozen identifiers of a single workout, but uniqueness is not guaranteed and the value
/// must not be used as a secret.
#[must_use]
pub fn generate_id() -> String {
    let mut value = Uuid::new_v4().as_u128();
    (0..ID_LENGTH)
        .map(|_| {
            #[allow(clippy::cast_possible_truncation)]
            let c = ALPHABET[(value % 36) as usize];
            value /= 36;
            char::from(c)
        })
        .collect()
}

macro_rules! string_id {
    ($name: ident) => {
        #[derive(Deref, Display, Into, Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_id!(MuscleGroupID);
string_id!(ExerciseID);
string_id!(SetID);
string_id!(WorkoutID);
string_id!(TemplateID);
string_id!(UserID);

impl ExerciseID {
    #[must_use]
    pub fn generate() -> Self {
        Self(generate_id())
    }
}

impl SetID {
    #[must_use]
    pub fn generate() -> Self {
        Self(generate_id())
    }
}
