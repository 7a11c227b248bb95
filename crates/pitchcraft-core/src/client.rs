use std::fmt;

use serde::{Deserialize, Serialize};

/// Line of business of a fictional client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientKind {
    Fashion,
    FoodAndBeverage,
    Barbershop,
}

impl ClientKind {
    pub const ALL: &[ClientKind] = &[
        ClientKind::Fashion,
        ClientKind::FoodAndBeverage,
        ClientKind::Barbershop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClientKind::Fashion => "fashion",
            ClientKind::FoodAndBeverage => "food_and_beverage",
            ClientKind::Barbershop => "barbershop",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ClientKind::Fashion => "Fashion",
            ClientKind::FoodAndBeverage => "F&B",
            ClientKind::Barbershop => "Barbershop",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "fashion" => Some(ClientKind::Fashion),
            "food_and_beverage" => Some(ClientKind::FoodAndBeverage),
            "barbershop" => Some(ClientKind::Barbershop),
            _ => None,
        }
    }
}

impl fmt::Display for ClientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How a client communicates, which drives caption tone and review voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    Appreciative,
    Outspoken,
    Technical,
}

impl Personality {
    pub fn display_name(&self) -> &'static str {
        match self {
            Personality::Appreciative => "Appreciative",
            Personality::Outspoken => "Outspoken",
            Personality::Technical => "Technical",
        }
    }

    /// Tone instructions injected into the caption prompt.
    pub fn tone_guidance(&self) -> &'static str {
        match self {
            Personality::Appreciative => {
                "The tone should be warm, elegant, and encouraging. Use sophisticated \
                 language that appeals to fashion-conscious customers."
            }
            Personality::Outspoken => {
                "The tone should be bold, direct, and playful. Use casual, energetic \
                 language with some slang that appeals to food enthusiasts."
            }
            Personality::Technical => {
                "The tone should be precise, structured, and professional. Use clean, \
                 clear language that appeals to customers who value quality grooming."
            }
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A fictional client the player works for during one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    pub kind: ClientKind,
    pub personality: Personality,
    pub description: String,
}

impl Client {
    /// The three selectable clients, in presentation order.
    pub fn roster() -> Vec<Client> {
        vec![
            Client {
                name: "LoveSummer".into(),
                kind: ClientKind::Fashion,
                personality: Personality::Appreciative,
                description: "Fashion brand for women who love feeling stylish and empowered"
                    .into(),
            },
            Client {
                name: "GoodFood".into(),
                kind: ClientKind::FoodAndBeverage,
                personality: Personality::Outspoken,
                description: "Bold and innovative food & beverage business with a focus on flavor"
                    .into(),
            },
            Client {
                name: "Gentleman Palace".into(),
                kind: ClientKind::Barbershop,
                personality: Personality::Technical,
                description: "Minimalist barbershop focused on precision and clean grooming"
                    .into(),
            },
        ]
    }

    /// First name of the person behind the business; reviews are written in
    /// their voice. Unrecognized clients get a neutral default.
    pub fn contact_name(&self) -> &'static str {
        match self.name.as_str() {
            "LoveSummer" => "Rina",
            "GoodFood" => "Budi",
            "Gentleman Palace" => "Brian",
            _ => "Alex",
        }
    }

    /// The campaign brief shown on step 3.
    pub fn brief(&self) -> String {
        match self.name.as_str() {
            "LoveSummer" => "Hey! I run a local fashion brand for women who love feeling \
                 stylish and empowered. Can you create a post that promotes our new summer \
                 collection? We want it to feel elegant, fun, and modern."
                .into(),
            "GoodFood" => "Yo! I'm launching a new spicy ramen and I want it to go viral. \
                 Make something bold and mouth-watering. Don't hold back - the caption \
                 should slap. This is for flavor lovers."
                .into(),
            "Gentleman Palace" => "Hello. I own a minimalist barbershop focused on precision \
                 and clean grooming. I need a social media post for our \"Fresh Fade Friday\" \
                 promo. Keep it sharp, clear, and professional."
                .into(),
            _ => format!(
                "I need a compelling social media post for my {} business. Please create \
                 something that matches our brand identity and resonates with our target \
                 audience.",
                self.kind.display_name()
            ),
        }
    }
}
