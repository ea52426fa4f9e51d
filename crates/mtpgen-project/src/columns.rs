//! `WireInformationColumns` block.
//!
//! The consuming application expects this list of wire metadata column
//! descriptors in every project, independent of the labels it holds. Order is
//! significant: each entry's `Index` is its position in [`WIRE_INFORMATION_COLUMNS`].

use mtpgen_xml::XmlElement;

/// A wire metadata column descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireColumn {
    /// Stable column identifier.
    pub id: &'static str,
    /// Value of the `AdditionalColumn` flag.
    pub additional: bool,
}

const fn column(id: &'static str, additional: bool) -> WireColumn {
    WireColumn { id, additional }
}

/// Number of column descriptors in every project.
pub const WIRE_COLUMN_COUNT: usize = 42;

/// Column descriptors in declared order.
pub const WIRE_INFORMATION_COLUMNS: [WireColumn; WIRE_COLUMN_COUNT] = [
    column("MaterialDisplayNameColumn", false),
    column("IndexOfWireColumn", false),
    column("CrossSectionColumn", false),
    column("CrossSectionUnitColumn", false),
    column("WireColorDescriptorColumn", false),
    column("PartNumberColumn", false),
    column("OrderNumberColumn", false),
    column("TypeDesignationColumn", false),
    column("WireLengthColumn", false),
    column("WireDiameterColumn", false),
    column("WireDiameterUnitColumn", false),
    column("EndSourceDirectionDescriptorColumn", false),
    // Identifier has no "Column" suffix in the consumer's schema.
    column("EndTargetDirectionDescriptor", false),
    column("SourceColumn", false),
    column("RoutingTrackColumn", false),
    column("TargetColumn", false),
    column("NumberOfCopiesColumn", false),
    column("PrintStatusColumn", false),
    column("PrintStampColumn", false),
    column("FunctionalAssignmentSourceColumn", true),
    column("FunctionalAssignmentTargetColumn", true),
    column("HighLevelFunctionSourceColumn", true),
    column("HighLevelFunctionTargetColumn", true),
    column("InstallationSiteSourceColumn", true),
    column("InstallationSiteTargetColumn", true),
    column("MountingLocationSourceColumn", true),
    column("MountingLocationTargetColumn", true),
    column("DtSourceColumn", true),
    column("DtTargetColumn", true),
    column("ConnectionPointSourceColumn", true),
    column("ConnectionPointTargetColumn", true),
    column("PageSourceColumn", true),
    column("PageTargetColumn", true),
    column("WireTerminationProcessingSourceColumn", true),
    column("WireTerminationProcessingTargetColumn", true),
    column("StrippingLengthSourceColumn", true),
    column("StrippingLengthTargetColumn", true),
    column("ConnectionDimensionSourceColumn", true),
    column("ConnectionDimensionTargetColumn", true),
    column("ConnectionDesignationColumn", true),
    // Unconfirmed: these two are not in the reference column list and have not
    // been checked against the consuming application.
    column("ConnectionDesignationSourceColumn", true),
    column("ConnectionDesignationTargetColumn", true),
];

/// Render the full column block, one element per descriptor.
pub fn wire_information_columns() -> impl Iterator<Item = XmlElement> {
    WIRE_INFORMATION_COLUMNS
        .iter()
        .enumerate()
        .map(|(index, col)| {
            XmlElement::new("WireInformationColumns")
                .attr("ColumnId", col.id)
                .attr("Index", index.to_string())
                .attr("IsReadonly", "true")
                .attr("AdditionalColumn", col.additional.to_string())
                .attr("HeaderText", "")
                .attr("IsVisible", "false")
        })
}
