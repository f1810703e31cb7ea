//! Role-gated routing, as a pure decision function.
//!
//! The caller's role is resolved once per request from the session token
//! into a `Role` variant; routes declare their allowed set and a mismatch
//! yields the role-appropriate default path.

/// Caller identity class. An absent or invalid token is `Guest`, not an
/// error, since public routes serve guests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Guest,
    Seeker,
    Employer,
}

impl Role {
    pub fn from_user_type(user_type: &str) -> Role {
        match user_type {
            "job_seeker" => Role::Seeker,
            "employer" => Role::Employer,
            _ => Role::Guest,
        }
    }

    pub fn as_user_type(self) -> &'static str {
        match self {
            Role::Seeker => "job_seeker",
            Role::Employer => "employer",
            Role::Guest => "guest",
        }
    }

    /// Where this role lands when turned away from a route.
    pub fn default_path(self) -> &'static str {
        match self {
            Role::Seeker => "/job-seeker/dashboard",
            Role::Employer => "/employer/dashboard",
            Role::Guest => "/login",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(&'static str),
}

/// Gates a route: allowed roles pass, everyone else is sent to their own
/// default (seekers and employers to their dashboards, guests to login).
pub fn decide(role: Role, allowed: &[Role]) -> Decision {
    if allowed.contains(&role) {
        Decision::Allow
    } else {
        Decision::Redirect(role.default_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_role_passes() {
        assert_eq!(decide(Role::Seeker, &[Role::Seeker]), Decision::Allow);
        assert_eq!(
            decide(Role::Employer, &[Role::Seeker, Role::Employer]),
            Decision::Allow
        );
    }

    #[test]
    fn test_employer_on_seeker_route_goes_to_employer_dashboard() {
        assert_eq!(
            decide(Role::Employer, &[Role::Seeker]),
            Decision::Redirect("/employer/dashboard")
        );
    }

    #[test]
    fn test_seeker_on_employer_route_goes_to_seeker_dashboard() {
        assert_eq!(
            decide(Role::Seeker, &[Role::Employer]),
            Decision::Redirect("/job-seeker/dashboard")
        );
    }

    #[test]
    fn test_guest_on_protected_route_goes_to_login() {
        assert_eq!(
            decide(Role::Guest, &[Role::Seeker]),
            Decision::Redirect("/login")
        );
        assert_eq!(
            decide(Role::Guest, &[Role::Employer]),
            Decision::Redirect("/login")
        );
        assert_eq!(
            decide(Role::Guest, &[Role::Seeker, Role::Employer]),
            Decision::Redirect("/login")
        );
    }

    #[test]
    fn test_role_parses_from_user_type() {
        assert_eq!(Role::from_user_type("job_seeker"), Role::Seeker);
        assert_eq!(Role::from_user_type("employer"), Role::Employer);
        assert_eq!(Role::from_user_type("something_else"), Role::Guest);
    }
}
