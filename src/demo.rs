use std::fmt;

use clap::ValueEnum;

/// Canned user stories for the `demo` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoExample {
    Login,
    Ecommerce,
    Api,
    Mobile,
}

impl fmt::Display for DemoExample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl DemoExample {
    pub fn name(&self) -> &'static str {
        match self {
            DemoExample::Login => "login",
            DemoExample::Ecommerce => "ecommerce",
            DemoExample::Api => "api",
            DemoExample::Mobile => "mobile",
        }
    }

    pub fn story(&self) -> &'static str {
        match self {
            DemoExample::Login => {
                "As a registered user, I want to log into my account using my email and password so that I can access my personalized dashboard."
            }
            DemoExample::Ecommerce => {
                "As a customer, I want to add items to my shopping cart and proceed to checkout so that I can purchase products online."
            }
            DemoExample::Api => {
                "As a developer, I want to integrate with a REST API to retrieve user data so that I can display user profiles in my application."
            }
            DemoExample::Mobile => {
                "As a mobile app user, I want to receive push notifications for important updates so that I stay informed about relevant activities."
            }
        }
    }

    pub fn criteria(&self) -> Vec<String> {
        let criteria: &[&str] = match self {
            DemoExample::Login => &[
                "User can enter valid email and password",
                "System validates credentials against database",
                "User is redirected to dashboard on successful login",
                "Error message shown for invalid credentials",
                "Account locked after 3 failed attempts",
            ],
            DemoExample::Ecommerce => &[
                "User can add products to cart",
                "Cart displays correct items and quantities",
                "User can modify cart contents",
                "Checkout process calculates total correctly",
                "Payment is processed securely",
            ],
            DemoExample::Api => &[
                "API returns user data in JSON format",
                "Authentication token is required",
                "Rate limiting is enforced",
                "Error responses are properly formatted",
                "Data includes all required user fields",
            ],
            DemoExample::Mobile => &[
                "Notifications appear on device lock screen",
                "User can enable/disable notifications",
                "Notifications are categorized by importance",
                "Tapping notification opens relevant app section",
                "Notification history is maintained",
            ],
        };
        criteria.iter().map(|s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StoryInput;

    #[test]
    fn test_every_example_passes_validation() {
        for example in [
            DemoExample::Login,
            DemoExample::Ecommerce,
            DemoExample::Api,
            DemoExample::Mobile,
        ] {
            let input = StoryInput::new(example.story(), Some(example.criteria()));
            assert!(input.is_ok(), "{} demo story should validate", example.name());
            assert_eq!(example.criteria().len(), 5);
        }
    }
}
