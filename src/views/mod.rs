//! The views module contains the components for all Layouts and Routes for our app.
//! Each submodule corresponds to a page of the dashboard.

mod home;
pub use home::Home;

mod clusters;
pub use clusters::Clusters;

mod nodes;
pub use nodes::Nodes;

mod namespaces;
pub use namespaces::Namespaces;

mod deployments;
pub use deployments::Deployments;

mod pods;
pub use pods::Pods;

mod network;
pub use network::Network;

mod playground;
pub use playground::Playground;

mod navbar;
pub use navbar::Navbar;
