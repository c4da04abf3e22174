//! Static and input-dependent route declarations.
//!
//! A router either owns a table built once, or a declaration function that
//! reads external inputs (an authentication flag, a feature set, ...) and is
//! re-run whenever those inputs change. Change detection is structural: the
//! previous snapshot is compared with `PartialEq`, never by the identity of
//! the declaration function.

use std::fmt;
use tracing::debug;

use super::core::{RouteMap, RouteTable};
use crate::config::RouterConfig;
use crate::error::Result;

type DeclareFn<U, I> = Box<dyn Fn(&mut RouteMap<U>, &I)>;

/// Route table derived from external inputs.
pub struct DynamicRoutes<U, I> {
    declare: DeclareFn<U, I>,
    config: RouterConfig,
    cached: Option<(I, RouteTable<U>)>,
    builds: usize,
}

impl<U, I> fmt::Debug for DynamicRoutes<U, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicRoutes")
            .field("cached", &self.cached.as_ref().map(|(_, t)| t))
            .field("builds", &self.builds)
            .finish()
    }
}

impl<U, I> DynamicRoutes<U, I>
where
    I: PartialEq + Clone,
{
    pub fn new<F>(declare: F) -> Self
    where
        F: Fn(&mut RouteMap<U>, &I) + 'static,
    {
        Self::with_config(declare, RouterConfig::default())
    }

    pub fn with_config<F>(declare: F, config: RouterConfig) -> Self
    where
        F: Fn(&mut RouteMap<U>, &I) + 'static,
    {
        Self {
            declare: Box::new(declare),
            config,
            cached: None,
            builds: 0,
        }
    }

    /// How many times the declaration function has been run.
    #[must_use]
    pub fn builds(&self) -> usize {
        self.builds
    }

    /// The table for `inputs`, rebuilding it if `inputs` differ from the
    /// snapshot the cached table was built from.
    ///
    /// # Errors
    ///
    /// Pattern errors from the declaration, or
    /// [`RouterError::MissingFallback`](crate::RouterError::MissingFallback)
    /// in strict mode. A failed build leaves nothing cached.
    pub fn table_for(&mut self, inputs: &I) -> Result<&RouteTable<U>> {
        let entry = match self.cached.take() {
            Some((previous, table)) if previous == *inputs => (previous, table),
            _ => (inputs.clone(), self.build(inputs)?),
        };
        let (_, table) = self.cached.insert(entry);
        Ok(table)
    }

    fn build(&mut self, inputs: &I) -> Result<RouteTable<U>> {
        let mut map = RouteMap::with_config(&self.config);
        (self.declare)(&mut map, inputs);
        let table = map.into_table()?;
        if self.config.require_fallback {
            table.ensure_fallback()?;
        }
        self.builds += 1;
        debug!(builds = self.builds, routes_count = table.len(), "Rebuilt dynamic route table");
        Ok(table)
    }
}

/// Where a router gets its table from.
pub enum RouteDeclaration<U, I = ()> {
    /// Built once, independent of inputs
    Static(RouteTable<U>),
    /// Re-derived from the current inputs snapshot
    Dynamic(DynamicRoutes<U, I>),
}

impl<U, I> fmt::Debug for RouteDeclaration<U, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteDeclaration::Static(table) => f.debug_tuple("Static").field(table).finish(),
            RouteDeclaration::Dynamic(routes) => f.debug_tuple("Dynamic").field(routes).finish(),
        }
    }
}

impl<U, I> From<RouteTable<U>> for RouteDeclaration<U, I> {
    fn from(table: RouteTable<U>) -> Self {
        RouteDeclaration::Static(table)
    }
}

impl<U, I> From<DynamicRoutes<U, I>> for RouteDeclaration<U, I> {
    fn from(routes: DynamicRoutes<U, I>) -> Self {
        RouteDeclaration::Dynamic(routes)
    }
}

impl<U, I> RouteDeclaration<U, I>
where
    I: PartialEq + Clone,
{
    /// The table to resolve against, given the current inputs.
    ///
    /// # Errors
    ///
    /// See [`DynamicRoutes::table_for`]; static tables never fail here.
    pub fn table_for(&mut self, inputs: &I) -> Result<&RouteTable<U>> {
        match self {
            RouteDeclaration::Static(table) => Ok(table),
            RouteDeclaration::Dynamic(routes) => routes.table_for(inputs),
        }
    }
}
