use std::{convert::Infallible, fmt::Display, ops::BitOr, str::FromStr};

use tracing::{instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct Roles(u8);

impl Roles {
    pub const NONE: Roles = Roles(0);
    pub const USER: Roles = Roles(1);
    pub const MODERATOR: Roles = Roles(2);
    pub const ADMIN: Roles = Roles(4);

    /// True when every role in `other` is held.
    pub fn contains(&self, other: Roles) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_none(&self) -> bool {
        *self == Roles::NONE
    }

    pub fn add(&mut self, other: Roles) {
        self.0 |= other.0;
    }

    fn iter(&self) -> RolesIter {
        RolesIter::new(*self)
    }
}

/// An iterator over the individual roles stored in the `Roles` bitflag, lowest bit first.
struct RolesIter {
    roles: Roles,
    idx: u8,
}

impl RolesIter {
    fn new(roles: Roles) -> Self {
        Self { roles, idx: 0 }
    }
}

impl Iterator for RolesIter {
    type Item = Roles;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let roles = self.roles.0.checked_shr(self.idx as u32).unwrap_or(0);

            if roles == 0 {
                return None;
            }

            let bit = self.idx;
            self.idx += 1;

            if roles % 2 == 1 {
                return Some(Roles(1 << bit));
            }
        }
    }
}

impl Display for Roles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for role in self.iter() {
            match role {
                Roles::USER => write!(f, "USER,")?,
                Roles::MODERATOR => write!(f, "MODERATOR,")?,
                Roles::ADMIN => write!(f, "ADMIN,")?,
                _ => write!(f, "UNKNOWN,")?,
            }
        }
        write!(f, "]")
    }
}

impl BitOr for Roles {
    type Output = Roles;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl FromStr for Roles {
    type Err = Infallible; // unknown roles are ignored

    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_matches('"') {
            "USER" => Ok(Roles::USER),
            "MODERATOR" => Ok(Roles::MODERATOR),
            "ADMIN" => Ok(Roles::ADMIN),
            other => {
                warn!("Unknown role: {other}. Ignoring");
                Ok(Roles::NONE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Roles;

    #[test]
    fn roles_contains() {
        let roles = Roles::USER | Roles::MODERATOR;

        assert!(roles.contains(Roles::USER));
        assert!(roles.contains(Roles::MODERATOR));
        assert!(!roles.contains(Roles::ADMIN));
    }

    #[test]
    fn roles_contains_needs_every_role() {
        let roles = Roles::USER;

        assert!(!roles.contains(Roles::USER | Roles::ADMIN));
        assert!((Roles::USER | Roles::ADMIN).contains(Roles::USER | Roles::ADMIN));
    }

    #[test]
    fn roles_iter() {
        let roles = Roles::USER | Roles::ADMIN;
        let mut iter = roles.iter();

        assert_eq!(Some(Roles::USER), iter.next());
        assert_eq!(Some(Roles::ADMIN), iter.next());
        assert_eq!(None, iter.next());
    }

    #[test]
    fn roles_display() {
        assert_eq!("[MODERATOR,]", &Roles::MODERATOR.to_string());
        assert_eq!("[USER,ADMIN,]", &(Roles::USER | Roles::ADMIN).to_string());
        assert_eq!("[]", &Roles::NONE.to_string());
    }

    #[test]
    fn unknown_roles_parse_to_none() {
        assert_eq!(Roles::NONE, "\"SUPERUSER\"".parse().unwrap());
        assert_eq!(Roles::MODERATOR, "\"MODERATOR\"".parse().unwrap());
    }
}
