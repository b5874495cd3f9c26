//! Field validators shared by the request serializers. Each returns the
//! message to report for the field.

pub fn validate_username(username: &str) -> Result<(), &'static str> {
	if username.len() < 3 {
		return Err("Username must be at least 3 characters long");
	}

	if username.len() > 20 {
		return Err("Username must be at most 20 characters long");
	}

	if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
		return Err("Username must only contain alphanumeric characters and underscores");
	}

	Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
	if password.len() < 8 {
		return Err("Password must be at least 8 characters long");
	}

	if !password.chars().any(|c| c.is_lowercase()) {
		return Err("Password must contain at least one lowercase character");
	}

	if !password.chars().any(|c| c.is_uppercase()) {
		return Err("Password must contain at least one uppercase character");
	}

	if !password.chars().any(|c| c.is_ascii_digit()) {
		return Err("Password must contain at least one digit");
	}

	if !password.chars().any(|c| !c.is_alphanumeric()) {
		return Err("Password must contain at least one special character");
	}

	if password.len() > 100 {
		return Err("Password must be at most 100 characters long");
	}

	Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
	if email.len() < 5 {
		return Err("Email must be at least 5 characters long");
	}

	if email.len() > 100 {
		return Err("Email must be at most 100 characters long");
	}

	if !email_address::EmailAddress::is_valid(email) {
		return Err("Email is not a valid email address");
	}

	Ok(())
}
