// Persona registry
//
// A persona frames one turn by appending a role-specific system
// instruction to the outbound message list. The model supplies the
// persona behavior; this module only owns the instruction text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Rejection for persona tags outside the closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown persona: {0}")]
pub struct UnknownPersona(pub String);

/// The closed set of conversation personas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Planner,
    Programmer,
    Qa,
    Devops,
    Designer,
    Security,
    Advisor,
    Docs,
}

impl Persona {
    /// Every declared persona, in registry order.
    pub const ALL: [Persona; 8] = [
        Persona::Planner,
        Persona::Programmer,
        Persona::Qa,
        Persona::Devops,
        Persona::Designer,
        Persona::Security,
        Persona::Advisor,
        Persona::Docs,
    ];

    /// Wire tag used in requests and configuration.
    pub fn tag(&self) -> &'static str {
        match self {
            Persona::Planner => "planner",
            Persona::Programmer => "programmer",
            Persona::Qa => "qa",
            Persona::Devops => "devops",
            Persona::Designer => "designer",
            Persona::Security => "security",
            Persona::Advisor => "advisor",
            Persona::Docs => "docs",
        }
    }

    /// Role phrase spliced into the instruction template, article included.
    fn role_phrase(&self) -> &'static str {
        match self {
            Persona::Planner => "a project planner",
            Persona::Programmer => "a project programmer",
            Persona::Qa => "a project Quality Assurance",
            Persona::Devops => "a project DevOps Engineer",
            Persona::Designer => "a project designer",
            Persona::Security => "a project security expert",
            Persona::Advisor => "an Mentor and Advisor",
            Persona::Docs => "a project documentation specialist",
        }
    }

    /// Build the system instruction for one turn.
    ///
    /// Pure: the same `(persona, user_text)` pair always yields the
    /// identical string.
    pub fn instruction(&self, user_text: &str) -> String {
        format!("As {}, {}", self.role_phrase(), user_text)
    }
}

impl FromStr for Persona {
    type Err = UnknownPersona;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Persona::ALL
            .iter()
            .find(|p| p.tag().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| UnknownPersona(s.to_string()))
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_phrasing_per_persona() {
        let cases = [
            (Persona::Planner, "As a project planner, Plan a release"),
            (Persona::Programmer, "As a project programmer, Plan a release"),
            (Persona::Qa, "As a project Quality Assurance, Plan a release"),
            (Persona::Devops, "As a project DevOps Engineer, Plan a release"),
            (Persona::Designer, "As a project designer, Plan a release"),
            (Persona::Security, "As a project security expert, Plan a release"),
            (Persona::Advisor, "As an Mentor and Advisor, Plan a release"),
            (
                Persona::Docs,
                "As a project documentation specialist, Plan a release",
            ),
        ];
        for (persona, expected) in cases {
            assert_eq!(persona.instruction("Plan a release"), expected);
        }
    }

    #[test]
    fn test_instruction_is_deterministic() {
        for persona in Persona::ALL {
            assert_eq!(
                persona.instruction("same input"),
                persona.instruction("same input")
            );
        }
    }

    #[test]
    fn test_parse_every_tag() {
        for persona in Persona::ALL {
            let parsed: Persona = persona.tag().parse().unwrap();
            assert_eq!(parsed, persona);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Planner".parse::<Persona>().unwrap(), Persona::Planner);
        assert_eq!("DEVOPS".parse::<Persona>().unwrap(), Persona::Devops);
    }

    #[test]
    fn test_parse_unknown_tag_rejected() {
        let err = "astronaut".parse::<Persona>().unwrap_err();
        assert_eq!(err, UnknownPersona("astronaut".to_string()));
        assert!(err.to_string().contains("astronaut"));
    }

    #[test]
    fn test_serde_tags_match_from_str() {
        for persona in Persona::ALL {
            let json = serde_json::to_string(&persona).unwrap();
            assert_eq!(json, format!("\"{}\"", persona.tag()));
            let back: Persona = serde_json::from_str(&json).unwrap();
            assert_eq!(back, persona);
        }
    }
}
