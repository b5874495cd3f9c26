use super::auth::AuthData;

/// Per request state filled in by the pre middlewares.
#[derive(Debug, Default, Clone)]
pub struct RequestContext {
	auth: Option<AuthData>,
}

impl RequestContext {
	pub fn set_auth(&mut self, data: AuthData) {
		self.auth = Some(data);
	}

	pub fn auth(&self) -> Option<&AuthData> {
		self.auth.as_ref()
	}
}
