/*!
The `Error`, `ErrorKind`, and `Result` types shared by every component of the
URI algebra.
*/

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

#[derive(Debug)]
pub enum Component {
    Scheme,
    Authority,
    Path,
    Query,
    Fragment,
}

error_chain! {
    errors {
        #[doc = "A URI cannot be constructed from the empty string."]
        IsEmpty {
            description("A URI cannot be constructed from the empty string.")
            display("A URI cannot be constructed from the empty string.")
        }
        #[doc = "An error occurred normalizing a URI component."]
        Normalization(c: Component) {
            description("An error occurred normalizing a URI component.")
            display("An error occurred normalizing the {:?} URI component.", c)
        }
        #[doc = "An invalid character was found."]
        InvalidChar(c: Component) {
            description("An invalid character was found.")
            display("An invalid character was found in the {:?} URI component.", c)
        }
        #[doc = "Provided String value is not a valid URI."]
        Syntax(s: String) {
            description("Provided String value is not a valid URI.")
            display("Provided String value `{}` is not a valid URI.", s)
        }
        #[doc = "The reference cannot be relativized against the given base."]
        NotRelativizable {
            description("The reference shares neither scheme nor authority with the base.")
            display("The reference shares neither scheme nor authority with the base.")
        }
        #[doc = "The path given to the file-URI constructor is not absolute."]
        NotAnAbsolutePath(s: String) {
            description("The path is not an absolute POSIX path or Windows drive path.")
            display("The path `{}` is not an absolute POSIX path or Windows drive path.", s)
        }
    }
}
