//! [`Args`] definitions.

use std::{path::PathBuf, str::FromStr};

use clap::{Parser, Subcommand};
use common::{datetime::Date, DateTime, Money};
use derive_more::{Display, Error};
use service::domain::{
    client,
    contact::{Email, Name, Phone},
    inventory, product,
    sale::{self, PaymentMethod},
    user::{self, Password},
};

/// Back-office client of the gas distribution business.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// [`Page`] to show.
    #[command(subcommand)]
    pub page: Page,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Page of the back-office.
#[derive(Debug, Subcommand)]
pub enum Page {
    /// Signs in with the provided credentials.
    Login {
        /// Email of the user.
        #[arg(long)]
        email: Email,

        /// Password of the user.
        #[arg(long)]
        password: Password,
    },

    /// Signs out.
    Logout,

    /// Shows the signed in user.
    Me,

    /// Shows the business overview.
    Dashboard,

    /// Manages clients.
    #[command(subcommand)]
    Clients(Clients),

    /// Manages products.
    #[command(subcommand)]
    Products(Products),

    /// Registers and browses sales.
    #[command(subcommand)]
    Sales(Sales),

    /// Registers and browses inventory movements.
    #[command(subcommand)]
    Inventory(Inventory),

    /// Manages users.
    #[command(subcommand)]
    Users(Users),

    /// Shows or exports the sales report.
    Reports(Report),

    /// Issues an invite code for a new user.
    Invite {
        /// RFC 3339 date and time the code expires at.
        #[arg(long, value_parser = DateTime::from_rfc3339)]
        expires_at: Option<DateTime>,
    },
}

/// Browsing options of a list page.
#[derive(Clone, Debug, clap::Args)]
pub struct Browse {
    /// Search term.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Number of pages to load.
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// Requests a page that failed to load once more.
    #[arg(long)]
    pub retry: bool,
}

/// Client pages.
#[derive(Debug, Subcommand)]
pub enum Clients {
    /// Lists clients.
    List(Browse),

    /// Shows a single client.
    Show {
        /// ID of the client.
        id: client::Id,
    },

    /// Registers a new client.
    Create(ClientInput),

    /// Replaces the data of a client.
    Update {
        /// ID of the client.
        id: client::Id,

        /// New data of the client.
        #[command(flatten)]
        input: ClientInput,
    },

    /// Removes a client.
    Delete {
        /// ID of the client.
        id: client::Id,
    },
}

/// Data of a client.
#[derive(Clone, Debug, clap::Args)]
pub struct ClientInput {
    /// Name of the client.
    #[arg(long)]
    pub name: Name,

    /// Identity document number (DNI, RUC).
    #[arg(long)]
    pub document: client::Document,

    /// Phone number.
    #[arg(long)]
    pub phone: Phone,

    /// Delivery address.
    #[arg(long)]
    pub address: Option<String>,

    /// Email address.
    #[arg(long)]
    pub email: Option<Email>,
}

impl From<ClientInput> for client::Input {
    fn from(value: ClientInput) -> Self {
        let ClientInput {
            name,
            document,
            phone,
            address,
            email,
        } = value;
        Self {
            name,
            document,
            address,
            phone,
            email,
        }
    }
}

/// Product pages.
#[derive(Debug, Subcommand)]
pub enum Products {
    /// Lists products.
    List(Browse),

    /// Shows a single product.
    Show {
        /// ID of the product.
        id: product::Id,
    },

    /// Registers a new product.
    Create(ProductInput),

    /// Replaces the data of a product.
    Update {
        /// ID of the product.
        id: product::Id,

        /// New data of the product.
        #[command(flatten)]
        input: ProductInput,
    },

    /// Removes a product.
    Delete {
        /// ID of the product.
        id: product::Id,
    },
}

/// Data of a product.
#[derive(Clone, Debug, clap::Args)]
pub struct ProductInput {
    /// Name of the product.
    #[arg(long)]
    pub name: Name,

    /// Standard unit price.
    #[arg(long)]
    pub base_price: Money,

    /// Price credited per returned empty cylinder.
    #[arg(long)]
    pub cylinder_price: Money,

    /// Allows negotiating the unit price per sale.
    #[arg(long)]
    pub negotiable_price: bool,

    /// Allows negotiating the empty cylinder price per sale.
    #[arg(long)]
    pub negotiable_cylinder: bool,
}

impl From<ProductInput> for product::Input {
    fn from(value: ProductInput) -> Self {
        let ProductInput {
            name,
            base_price,
            cylinder_price,
            negotiable_price,
            negotiable_cylinder,
        } = value;
        Self {
            name,
            base_price,
            empty_cylinder_price: cylinder_price,
            allow_price_negotiation: negotiable_price,
            allow_cylinder_negotiation: negotiable_cylinder,
        }
    }
}

/// Sale pages.
#[derive(Debug, Subcommand)]
pub enum Sales {
    /// Lists sales.
    List {
        /// Browsing options.
        #[command(flatten)]
        browse: Browse,

        /// Only sales of this client.
        #[arg(long)]
        client: Option<client::Id>,
    },

    /// Shows a single sale.
    Show {
        /// ID of the sale.
        id: sale::Id,
    },

    /// Composes and registers a new sale.
    New {
        /// ID of the buying client.
        #[arg(long)]
        client: client::Id,

        /// Payment method (`cash` or `yape`).
        #[arg(long, default_value = "CASH")]
        payment: PaymentMethod,

        /// Line of the sale, as
        /// `PRODUCT:SOLD[:RETURNED[:PRICE[:CYLINDER_PRICE]]]`.
        #[arg(long = "item", required = true)]
        items: Vec<Item>,
    },
}

/// Line of a sale being composed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Item {
    /// ID of the sold product.
    pub product: product::Id,

    /// Number of full cylinders sold.
    pub sold: u32,

    /// Number of empty cylinders returned.
    pub returned: u32,

    /// Negotiated unit price.
    pub price: Option<Money>,

    /// Negotiated empty cylinder price.
    pub cylinder_price: Option<Money>,
}

impl FromStr for Item {
    type Err = InvalidItem;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn money(part: Option<&str>) -> Result<Option<Money>, InvalidItem> {
            part.filter(|p| !p.is_empty())
                .map(str::parse)
                .transpose()
                .map_err(|_| InvalidItem::Price)
        }

        let mut parts = s.split(':');
        let product = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or(InvalidItem::Product)?;
        let sold = parts
            .next()
            .ok_or(InvalidItem::Quantity)?
            .parse()
            .map_err(|_| InvalidItem::Quantity)?;
        let returned = parts
            .next()
            .map_or(Ok(0), str::parse)
            .map_err(|_| InvalidItem::Quantity)?;
        let price = money(parts.next())?;
        let cylinder_price = money(parts.next())?;
        if parts.next().is_some() {
            return Err(InvalidItem::Format);
        }

        Ok(Self {
            product,
            sold,
            returned,
            price,
            cylinder_price,
        })
    }
}

/// Error of parsing an [`Item`].
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum InvalidItem {
    /// Product ID is missing.
    #[display("missing product ID")]
    Product,

    /// Quantity is missing or not a number.
    #[display("quantities must be non-negative integers")]
    Quantity,

    /// Price is not an amount.
    #[display("invalid negotiated price")]
    Price,

    /// Too many parts.
    #[display("expected `PRODUCT:SOLD[:RETURNED[:PRICE[:CYLINDER_PRICE]]]`")]
    Format,
}

/// Inventory pages.
#[derive(Debug, Subcommand)]
pub enum Inventory {
    /// Lists inventory movements.
    List {
        /// Browsing options.
        #[command(flatten)]
        browse: Browse,

        /// Only movements of this product.
        #[arg(long)]
        product: Option<product::Id>,
    },

    /// Registers a new inventory movement.
    Add {
        /// ID of the moved product.
        #[arg(long)]
        product: product::Id,

        /// Direction of the movement (`in` or `out`).
        #[arg(long)]
        kind: inventory::Kind,

        /// Number of moved units.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,

        /// Reason of the movement.
        #[arg(long)]
        description: Option<String>,
    },
}

/// User pages.
#[derive(Debug, Subcommand)]
pub enum Users {
    /// Lists users.
    List(Browse),

    /// Registers a new user.
    Create {
        /// Name of the user.
        #[arg(long)]
        name: Name,

        /// Email of the user.
        #[arg(long)]
        email: Email,

        /// Password of the user.
        #[arg(long)]
        password: Password,

        /// Role of the user (`admin` or `member`).
        #[arg(long, default_value = "MEMBER")]
        role: user::Role,
    },

    /// Updates the provided fields of a user.
    Update {
        /// ID of the user.
        id: user::Id,

        /// New name.
        #[arg(long)]
        name: Option<Name>,

        /// New email.
        #[arg(long)]
        email: Option<Email>,

        /// New password.
        #[arg(long)]
        password: Option<Password>,

        /// New role.
        #[arg(long)]
        role: Option<user::Role>,
    },
}

/// Sales report options.
#[derive(Clone, Debug, clap::Args)]
pub struct Report {
    /// First day included, as `YYYY-MM-DD`.
    #[arg(long)]
    pub from: Option<Date>,

    /// Last day included, as `YYYY-MM-DD`.
    #[arg(long)]
    pub to: Option<Date>,

    /// Only sales of this client.
    #[arg(long)]
    pub client: Option<client::Id>,

    /// Only sales registered by this user.
    #[arg(long)]
    pub user: Option<user::Id>,

    /// Only sales paid this way.
    #[arg(long)]
    pub payment: Option<PaymentMethod>,

    /// Writes the report spreadsheet into this file instead of showing it.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;
    use common::Money;

    use super::{Args, Clients, InvalidItem, Item, Page, Sales};

    #[test]
    fn parses_sale_items() {
        let item: Item = "p1:2:1:120:90.5".parse().unwrap();
        assert_eq!(item.product.as_ref(), "p1");
        assert_eq!((item.sold, item.returned), (2, 1));
        assert_eq!(item.price, Some(Money::from_cents(12_000)));
        assert_eq!(item.cylinder_price, Some(Money::from_cents(9_050)));

        let item: Item = "p2:3".parse().unwrap();
        assert_eq!((item.sold, item.returned), (3, 0));
        assert_eq!(item.price, None);

        let item: Item = "p2:0:4::80".parse().unwrap();
        assert_eq!(item.price, None);
        assert_eq!(item.cylinder_price, Some(Money::from_cents(8_000)));

        assert!(matches!(
            "p1:-2".parse::<Item>(),
            Err(InvalidItem::Quantity),
        ));
        assert!(matches!(
            "p1:1:0:1:1:1".parse::<Item>(),
            Err(InvalidItem::Format),
        ));
    }

    #[test]
    fn parses_new_sale_page() {
        let args = Args::try_parse_from([
            "gasdist",
            "sales",
            "new",
            "--client",
            "c1",
            "--payment",
            "yape",
            "--item",
            "p1:2:1",
            "--item",
            "p2:1",
        ])
        .unwrap();

        let Page::Sales(Sales::New { items, .. }) = args.page else {
            panic!("unexpected page");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(args.config, "config.toml");
    }

    #[test]
    fn retry_is_opt_in() {
        let args =
            Args::try_parse_from(["gasdist", "clients", "list", "--pages", "3"])
                .unwrap();
        let Page::Clients(Clients::List(browse)) = args.page else {
            panic!("unexpected page");
        };
        assert_eq!(browse.pages, 3);
        assert!(!browse.retry);

        let args =
            Args::try_parse_from(["gasdist", "clients", "list", "--retry"])
                .unwrap();
        let Page::Clients(Clients::List(browse)) = args.page else {
            panic!("unexpected page");
        };
        assert!(browse.retry);
    }
}
