use crate::solver::RADIUS;
use crate::stencil::StencilShape;
use crate::util::*;

pub fn print_report(name: &str) {
    println!("{{");
    println!("  \"name\": \"{}\",", name);
    println!("  \"git_describe\": \"{}\",", env!("GIT_DESCRIBE"));
    println!("  \"git_hash\": \"{}\",", env!("GIT_HASH"));
    println!("  \"precision\": \"{}\",", <Real as StencilFloat>::PRECISION_NAME);
    println!("  \"shape\": \"{}\",", StencilShape::BUILD);
    println!("  \"radius\": {}", RADIUS);
    println!("}}");
}
