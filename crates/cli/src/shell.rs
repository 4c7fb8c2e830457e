//! Interactive menu shell.
//!
//! Blocking and line-buffered: one prompt, one answer. Bad input reports and
//! re-prompts; nothing here aborts the session.

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use quickbill_catalog::{Catalog, CatalogError};
use quickbill_core::{DomainError, Money, ProductId};
use quickbill_invoicing::{Invoice, report};

use crate::config::Config;

/// What a prompt interaction produced.
enum Input {
    Line(String),
    /// Ctrl-C: abandon the current flow, back to the enclosing menu.
    Cancelled,
    /// Ctrl-D or closed stdin: leave the program.
    Quit,
}

pub struct Shell {
    catalog: Catalog,
    config: Config,
    editor: DefaultEditor,
}

impl Shell {
    pub fn new(catalog: Catalog, config: Config) -> Result<Self> {
        Ok(Self {
            catalog,
            config,
            editor: DefaultEditor::new()?,
        })
    }

    /// Run the top-level menu until the user exits.
    pub fn run(&mut self) -> Result<()> {
        loop {
            println!();
            println!("======== {} BILLING ========", self.config.store_name);
            println!("  1. Generate New Invoice");
            println!("  2. Search for Invoice");
            println!("  3. Manage Products");
            println!("  4. Exit");
            match self.prompt("Enter your choice: ")? {
                Input::Line(choice) => match choice.trim() {
                    "1" => self.generate_invoice()?,
                    "2" => self.search_invoice()?,
                    "3" => self.manage_products()?,
                    "4" => break,
                    _ => println!("Invalid choice. Please try again."),
                },
                Input::Cancelled => continue,
                Input::Quit => break,
            }
        }
        println!("Goodbye!");
        Ok(())
    }

    fn manage_products(&mut self) -> Result<()> {
        loop {
            println!();
            println!("--- Product Management ---");
            println!("  1. Add New Product");
            println!("  2. Delete Product");
            println!("  3. View All Products");
            println!("  4. Return to Main Menu");
            match self.prompt("Enter your choice: ")? {
                Input::Line(choice) => match choice.trim() {
                    "1" => self.add_product()?,
                    "2" => self.delete_product()?,
                    "3" => self.list_products(),
                    "4" => return Ok(()),
                    _ => println!("Invalid choice. Please try again."),
                },
                Input::Cancelled => continue,
                Input::Quit => return Ok(()),
            }
        }
    }

    fn add_product(&mut self) -> Result<()> {
        let Some(name) = self.prompt_in_flow("Enter new product name: ")? else {
            return Ok(());
        };
        let Some(price) = self.prompt_parse::<Money>(
            "Enter product price: ",
            "Please enter a non-negative amount like 2.50.",
        )?
        else {
            return Ok(());
        };
        match self.catalog.add(name.trim(), price) {
            Ok(product) => println!(
                "Product '{}' added successfully with ID {}.",
                product.name(),
                product.id()
            ),
            Err(e) => println!("Could not add product: {e}"),
        }
        Ok(())
    }

    fn delete_product(&mut self) -> Result<()> {
        self.list_products();
        if self.catalog.is_empty() {
            return Ok(());
        }
        let Some(id) = self.prompt_parse::<ProductId>(
            "Enter the ID of the product to delete: ",
            "Please enter a numeric product ID.",
        )?
        else {
            return Ok(());
        };
        match self.catalog.delete(id) {
            Ok(removed) => println!("Product '{}' has been deleted.", removed.name()),
            Err(CatalogError::Domain(DomainError::NotFound)) => {
                println!("Product with ID {id} not found.");
            }
            Err(e) => println!("Could not delete product: {e}"),
        }
        Ok(())
    }

    fn list_products(&self) {
        println!();
        println!("--- Available Products ---");
        if self.catalog.is_empty() {
            println!("No products in the catalog. Please add some first.");
            return;
        }
        println!("{:<6}{:<30}{:>10}", "ID", "Name", "Price");
        println!("{}", "-".repeat(46));
        for product in self.catalog.products() {
            println!(
                "{:<6}{:<30}{:>10}",
                product.id(),
                product.name(),
                format!("${}", product.price())
            );
        }
        println!("{}", "-".repeat(46));
    }

    fn generate_invoice(&mut self) -> Result<()> {
        if self.catalog.is_empty() {
            println!("Cannot generate an invoice: no products available in the catalog.");
            return Ok(());
        }

        println!();
        println!("--- Generate New Invoice ---");
        let Some(customer) = self.prompt_in_flow("Enter customer name: ")? else {
            return Ok(());
        };
        let customer = customer.trim().to_string();
        if customer.is_empty() {
            println!("Customer name cannot be empty.");
            return Ok(());
        }

        self.list_products();

        let Some(count) =
            self.prompt_parse::<u32>("How many unique items to bill? ", "Please enter a number.")?
        else {
            return Ok(());
        };

        let mut invoice = Invoice::new(customer, chrono::Local::now().date_naive());
        for item_no in 1..=count {
            println!();
            println!("--- Item {item_no} of {count} ---");
            let product = loop {
                let Some(id) = self.prompt_parse::<ProductId>(
                    "Enter product ID: ",
                    "Please enter a numeric product ID.",
                )?
                else {
                    return Ok(());
                };
                match self.catalog.find(id) {
                    Some(product) => break product.clone(),
                    None => println!("Invalid product ID. Please try again."),
                }
            };
            let quantity_prompt = format!("Enter quantity for {}: ", product.name());
            let Some(quantity) =
                self.prompt_parse::<u32>(&quantity_prompt, "Please enter a whole number.")?
            else {
                return Ok(());
            };
            invoice.push_line(product.name(), product.price(), quantity);
        }

        match report::write_report(&self.config.invoice_dir, &invoice, &self.config.store_name) {
            Ok(path) => println!("Invoice generated and saved as {}.", path.display()),
            Err(e) => println!("Could not save invoice: {e}"),
        }
        Ok(())
    }

    fn search_invoice(&mut self) -> Result<()> {
        println!();
        println!("--- Search for Invoice ---");
        let Some(customer) = self.prompt_in_flow("Enter customer name to search: ")? else {
            return Ok(());
        };
        let customer = customer.trim();
        match report::find_report(&self.config.invoice_dir, customer) {
            Ok(Some(contents)) => {
                println!();
                println!("--- Invoice Found ---");
                println!();
                print!("{contents}");
            }
            Ok(None) => println!("Invoice for '{customer}' not found."),
            Err(e) => println!("Could not read invoice: {e}"),
        }
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<Input> {
        match self.editor.readline(text) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                Ok(Input::Cancelled)
            }
            Err(ReadlineError::Eof) => Ok(Input::Quit),
            Err(e) => Err(e.into()),
        }
    }

    /// Prompt inside a flow; `None` abandons the flow (Ctrl-C or EOF).
    fn prompt_in_flow(&mut self, text: &str) -> Result<Option<String>> {
        Ok(match self.prompt(text)? {
            Input::Line(line) => Some(line),
            Input::Cancelled | Input::Quit => None,
        })
    }

    /// Prompt until the input parses, or the flow is abandoned.
    fn prompt_parse<T: std::str::FromStr>(
        &mut self,
        text: &str,
        complaint: &str,
    ) -> Result<Option<T>> {
        loop {
            let Some(line) = self.prompt_in_flow(text)? else {
                return Ok(None);
            };
            match line.trim().parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => println!("{complaint}"),
            }
        }
    }
}
