use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// A film director. Full CRUD, unlike the genre/MPA reference data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Director {
    pub id: i64,
    pub name: String,
}

pub fn validate_director(director: &Director) -> DomainResult<()> {
    if director.name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Director name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_fails() {
        let director = Director {
            id: 0,
            name: " ".to_string(),
        };
        assert!(validate_director(&director).is_err());
    }
}
