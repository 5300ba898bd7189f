//! Request forms.
//!
//! Each form binds user input to schema fields and validates before any
//! write. Validation accumulates every field error; a failing form
//! performs no write. Unknown payload fields are ignored, so a comment
//! submission claiming `approved: true` has no effect.

use serde::Deserialize;

use inkpress_core::validate::{email, length, required, FieldErrors};
use inkpress_core::PostStatus;

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub body: String,
}

impl CommentForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        required(&mut errors, "body", &self.body);
        errors.into_result()
    }
}

#[derive(Debug, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub categories: Vec<i64>,
}

impl PostForm {
    pub fn validate(&self) -> Result<PostStatus, FieldErrors> {
        let mut errors = FieldErrors::new();
        required(&mut errors, "title", &self.title);
        length(&mut errors, "title", &self.title, 1, 200);
        required(&mut errors, "content", &self.content);

        let status = match PostStatus::from_i64(self.status) {
            Some(status) => status,
            None => {
                errors.add_error("status", "Must be 0 (draft) or 1 (published)", "invalid_choice");
                PostStatus::Draft
            }
        };

        errors.into_result().map(|_| status)
    }
}

#[derive(Debug, Deserialize)]
pub struct CollaborateForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub message: String,
}

impl CollaborateForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        required(&mut errors, "name", &self.name);
        length(&mut errors, "name", &self.name, 1, 200);
        required(&mut errors, "email", &self.email);
        email(&mut errors, "email", &self.email);
        required(&mut errors, "message", &self.message);
        length(&mut errors, "phone", &self.phone, 1, 20);
        errors.into_result()
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        required(&mut errors, "username", &self.username);
        length(&mut errors, "username", &self.username, 3, 150);
        required(&mut errors, "email", &self.email);
        email(&mut errors, "email", &self.email);
        required(&mut errors, "password", &self.password);
        length(&mut errors, "password", &self.password, 8, 128);
        errors.into_result()
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
}

impl ProfileForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        required(&mut errors, "username", &self.username);
        length(&mut errors, "username", &self.username, 3, 150);
        required(&mut errors, "email", &self.email);
        email(&mut errors, "email", &self.email);
        errors.into_result()
    }
}

#[derive(Debug, Deserialize)]
pub struct AboutForm {
    pub title: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    pub content: String,
}

impl AboutForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        required(&mut errors, "title", &self.title);
        length(&mut errors, "title", &self.title, 1, 200);
        required(&mut errors, "content", &self.content);
        errors.into_result()
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    pub name: String,
}

impl CategoryForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        required(&mut errors, "name", &self.name);
        length(&mut errors, "name", &self.name, 1, 100);
        errors.into_result()
    }
}

#[derive(Debug, Deserialize)]
pub struct MarkReadForm {
    pub ids: Vec<i64>,
}
