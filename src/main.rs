use lattice_rs::lattice::Lattice;
use lattice_rs::pricing::OptionStyle;
use lattice_rs::pricing::OptionType;
use lattice_rs::pricing::binomial::BinomialTreePricer;
use lattice_rs::visualization::TreePlotter;

fn main() {
  let pricer = BinomialTreePricer::new(
    50.0,
    52.0,
    0.05,
    Some(0.0),
    1.2,
    0.8,
    2,
    Some(2.0),
    None,
    None,
    OptionType::Put,
    OptionStyle::American,
  );
  let result = pricer.price_tree();

  println!(
    "The current value of the {} {} option is {}",
    pricer.option_style, pricer.option_type, result.value
  );
  print_lattice("Stock price lattice", &result.stock_prices);
  print_lattice("Option value lattice", &result.option_values);

  TreePlotter::new()
    .title("Binomial price tree")
    .register(&result.stock_prices, "Price tree")
    .plot()
    .write_html("target/binomial_price_tree.html");
  TreePlotter::new()
    .title("Binomial value tree")
    .register(&result.option_values, "Value tree")
    .plot()
    .write_html("target/binomial_value_tree.html");
  println!("Price tree written to target/binomial_price_tree.html");
  println!("Value tree written to target/binomial_value_tree.html");
}

fn print_lattice(title: &str, lattice: &Lattice) {
  println!("{title}:");
  for step in 0..=lattice.steps() {
    let row = lattice
      .layer(step)
      .iter()
      .map(|v| v.to_string())
      .collect::<Vec<String>>();
    println!("  [{}]", row.join(", "));
  }
}
