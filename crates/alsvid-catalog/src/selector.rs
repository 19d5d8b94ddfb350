//! Catalog selection sessions.
//!
//! A [`Selector`] owns the selection state of one research session: which
//! sub-systems are active, which components were chosen, and the resonator
//! topology. It is an ordinary caller-owned value; two sessions never share
//! state. Component-name validation soft-fails: an unsupported name leaves
//! the selection unset and logs the valid alternatives, so an exploratory
//! session keeps going instead of aborting.

use crate::error::{CatalogError, CatalogResult};
use crate::join;
use crate::key::{DataType, DatasetKey, Subsystem};
use crate::provider::CatalogProvider;
use alsvid_types::physics::DEFAULT_LINE_IMPEDANCE;
use alsvid_types::{columns, ResonatorType, WorkingTable};
use tracing::{info, warn};

/// Which sub-systems are active in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemSelection {
    /// A single sub-system table.
    Single(Subsystem),
    /// The coupled qubit + cavity-claw system.
    QubitCavity,
}

/// Feedline coupler implied by each resonator topology.
fn coupler_for(resonator_type: ResonatorType) -> &'static str {
    match resonator_type {
        ResonatorType::Quarter => "CLT",
        ResonatorType::Half => "NCap",
    }
}

/// Selection state plus the cached working table it produces.
#[derive(Debug, Clone)]
pub struct Selector<P> {
    provider: P,
    system: Option<SystemSelection>,
    qubit: Option<String>,
    cavity: Option<String>,
    coupler: Option<String>,
    resonator_type: Option<ResonatorType>,
    working: Option<WorkingTable>,
}

impl<P: CatalogProvider> Selector<P> {
    /// Create a session over a provider, with nothing selected.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            system: None,
            qubit: None,
            cavity: None,
            coupler: None,
            resonator_type: None,
            working: None,
        }
    }

    /// The underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Declare the active sub-system(s). Invalidates the cached table.
    pub fn select_system(&mut self, system: SystemSelection) {
        self.system = Some(system);
        self.working = None;
    }

    /// Select the qubit component.
    ///
    /// Fails if the active system has no qubit. An unsupported component name
    /// is not an error: the selection stays unset and the valid names are
    /// logged for the user.
    pub fn select_qubit(&mut self, name: &str) -> CatalogResult<()> {
        if !self.system_includes(Subsystem::Qubit) {
            return Err(CatalogError::MissingSelection(
                "active system does not contain a qubit".to_string(),
            ));
        }
        self.working = None;
        if self.provider.supports(Subsystem::Qubit, name) {
            self.qubit = Some(name.to_string());
        } else {
            warn!(
                "qubit `{}` not supported; available qubits: {:?}",
                name,
                self.provider.component_names(Subsystem::Qubit)
            );
            self.qubit = None;
        }
        Ok(())
    }

    /// Select the cavity component. Same soft-fail contract as
    /// [`select_qubit`](Self::select_qubit).
    pub fn select_cavity(&mut self, name: &str) -> CatalogResult<()> {
        if !self.system_includes(Subsystem::CavityClaw) {
            return Err(CatalogError::MissingSelection(
                "active system does not contain a cavity".to_string(),
            ));
        }
        self.working = None;
        if self.provider.supports(Subsystem::CavityClaw, name) {
            self.cavity = Some(name.to_string());
        } else {
            warn!(
                "cavity `{}` not supported; available cavities: {:?}",
                name,
                self.provider.component_names(Subsystem::CavityClaw)
            );
            self.cavity = None;
        }
        Ok(())
    }

    /// Select the resonator topology; the feedline coupler follows from it
    /// (quarter-wave → `CLT`, half-wave → `NCap`).
    pub fn select_resonator_type(&mut self, resonator_type: ResonatorType) {
        self.resonator_type = Some(resonator_type);
        self.coupler = Some(coupler_for(resonator_type).to_string());
        self.working = None;
        info!(
            "resonator type `{}` selected; coupler `{}`",
            resonator_type,
            coupler_for(resonator_type)
        );
    }

    /// Clear every selection and the cached table.
    pub fn unselect_all(&mut self) {
        self.system = None;
        self.qubit = None;
        self.cavity = None;
        self.coupler = None;
        self.resonator_type = None;
        self.working = None;
    }

    /// The active system, if declared.
    pub fn system(&self) -> Option<SystemSelection> {
        self.system
    }

    /// The selected qubit component, if set.
    pub fn qubit(&self) -> Option<&str> {
        self.qubit.as_deref()
    }

    /// The selected cavity component, if set.
    pub fn cavity(&self) -> Option<&str> {
        self.cavity.as_deref()
    }

    /// The active coupler, if a resonator type was selected.
    pub fn coupler(&self) -> Option<&str> {
        self.coupler.as_deref()
    }

    /// The selected resonator topology, if set.
    pub fn resonator_type(&self) -> Option<ResonatorType> {
        self.resonator_type
    }

    /// The cached working table, if one was built since the last selection
    /// change.
    pub fn working_table(&self) -> Option<&WorkingTable> {
        self.working.as_ref()
    }

    /// Fetch, join, and merge the active selection into the working table.
    ///
    /// The result is cached until the next selection change. An empty join
    /// result is returned as-is; it is the matcher that refuses to search an
    /// empty table.
    pub fn build_working_table(&mut self) -> CatalogResult<&WorkingTable> {
        if self.working.is_none() {
            let table = self.assemble()?;
            info!("working table built: {} rows", table.len());
            self.working = Some(table);
        }
        Ok(self.working.as_ref().expect("just built"))
    }

    fn system_includes(&self, subsystem: Subsystem) -> bool {
        match self.system {
            Some(SystemSelection::Single(s)) => s == subsystem,
            Some(SystemSelection::QubitCavity) => {
                matches!(subsystem, Subsystem::Qubit | Subsystem::CavityClaw)
            }
            None => false,
        }
    }

    fn assemble(&self) -> CatalogResult<WorkingTable> {
        match self.system {
            None => Err(CatalogError::MissingSelection(
                "no system selected".to_string(),
            )),
            Some(SystemSelection::Single(subsystem)) => self.single_component_table(subsystem),
            Some(SystemSelection::QubitCavity) => self.coupled_table(),
        }
    }

    fn component_for(&self, subsystem: Subsystem) -> CatalogResult<&str> {
        let (name, what) = match subsystem {
            Subsystem::Qubit => (self.qubit.as_deref(), "no qubit selected"),
            Subsystem::CavityClaw => (self.cavity.as_deref(), "no cavity selected"),
            Subsystem::Coupler => (self.coupler.as_deref(), "no coupler selected"),
        };
        name.ok_or_else(|| CatalogError::MissingSelection(what.to_string()))
    }

    fn data_type_for(subsystem: Subsystem) -> DataType {
        match subsystem {
            Subsystem::Qubit | Subsystem::Coupler => DataType::CapMatrix,
            Subsystem::CavityClaw => DataType::Eigenmode,
        }
    }

    fn single_component_table(&self, subsystem: Subsystem) -> CatalogResult<WorkingTable> {
        let component = self.component_for(subsystem)?;
        let key = DatasetKey::new(subsystem, component, Self::data_type_for(subsystem));
        let mut table = self.provider.fetch(&key)?;

        if subsystem == Subsystem::CavityClaw {
            table = self.prepare_cavity_table(table)?;
        }
        Ok(table)
    }

    fn coupled_table(&self) -> CatalogResult<WorkingTable> {
        let qubit_component = self.component_for(Subsystem::Qubit)?;
        let cavity_component = self.component_for(Subsystem::CavityClaw)?;

        let qubit_table = self.provider.fetch(&DatasetKey::new(
            Subsystem::Qubit,
            qubit_component,
            DataType::CapMatrix,
        ))?;
        let cavity_table = self.provider.fetch(&DatasetKey::new(
            Subsystem::CavityClaw,
            cavity_component,
            DataType::Eigenmode,
        ))?;
        let cavity_table = self.prepare_cavity_table(cavity_table)?;

        let coupler = self.coupler.as_deref().unwrap_or("CLT");
        Ok(join::join_qubit_cavity(
            &qubit_table,
            &cavity_table,
            join::CLAW_MERGER_TERMS,
            coupler,
        ))
    }

    /// Coupler filtering, half-wave loading, and unit normalization shared by
    /// the single-cavity and coupled paths.
    fn prepare_cavity_table(&self, table: WorkingTable) -> CatalogResult<WorkingTable> {
        let mut table = table;
        if let Some(coupler) = self.coupler.as_deref() {
            table = table.filter_tag(columns::COUPLER_TYPE, coupler);
            if coupler == "NCap" {
                let ncap = self.provider.fetch(&DatasetKey::new(
                    Subsystem::Coupler,
                    "NCap",
                    DataType::CapMatrix,
                ))?;
                table = join::apply_coupler_loading(
                    &table,
                    &ncap,
                    join::NCAP_MERGER_TERMS,
                    DEFAULT_LINE_IMPEDANCE,
                )?;
            }
        }
        Ok(join::normalize_cavity_columns(&table))
    }
}
