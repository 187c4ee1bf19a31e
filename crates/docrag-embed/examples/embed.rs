use docrag_embed::{embed, tokenize};

fn main() {
    let text = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let tokens: Vec<String> = tokenize(&text).collect();
    let v = embed(&text);
    let nonzero: Vec<(usize, f64)> = v.iter().copied().enumerate().filter(|(_, x)| *x != 0.0).collect();
    println!("tokens={tokens:?}");
    println!("dim={} nonzero={:?}", v.len(), nonzero);
}
