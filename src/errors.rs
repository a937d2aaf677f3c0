// `error_chain!` creates the Error, ErrorKind, ResultExt and Result types for the library.
// Result is a typedef of std `Result` with our own `Error`, the foreign links give the From
// conversions that let `?` work on io and image results.
use error_chain::error_chain;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        Image(::image::ImageError);
    }

    errors {
        EmptyTexture {
            description("texture image has no pixels")
            display("texture image has no pixels")
        }
    }
}
